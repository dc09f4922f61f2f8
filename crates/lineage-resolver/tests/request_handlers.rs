//! Request handler hierarchies
//!
//! Handlers decode their input into the type bound to the first slot of
//! `AbstractRequestHandler<I, O>`; these tests check what that type is for
//! each concrete handler.

use lineage_metadata::{DeclarationTable, MetadataError};
use lineage_resolver::{DeclId, ResolveError, TypeResolver, TypeRef};
use pretty_assertions::assert_eq;

fn concrete(name: &str) -> TypeRef {
    TypeRef::concrete(name)
}

fn var(name: &str) -> TypeRef {
    TypeRef::variable(name)
}

fn list_of(arg: TypeRef) -> TypeRef {
    TypeRef::parameterized("List", vec![arg])
}

fn no_slots() -> Vec<&'static str> {
    Vec::new()
}

struct Handlers {
    table: DeclarationTable,
    root: DeclId,
}

impl Handlers {
    fn id(&self, name: &str) -> DeclId {
        self.table.lookup(name).unwrap()
    }

    fn input_type(&self, handler: &str) -> Result<TypeRef, ResolveError> {
        TypeResolver::new(&self.table).resolve_parameter(self.id(handler), self.root, 0)
    }
}

fn handlers() -> Handlers {
    let mut b = DeclarationTable::builder();

    b.declare("User", no_slots(), None);
    b.declare("UniversityUser", no_slots(), Some(concrete("User")));
    b.declare("Student", no_slots(), Some(concrete("UniversityUser")));
    b.declare("Teacher", no_slots(), Some(concrete("UniversityUser")));

    let root = b.declare("AbstractRequestHandler", ["I", "O"], None);

    b.declare(
        "ArrayGenericRequestHandler",
        ["Y"],
        Some(TypeRef::parameterized(
            "AbstractRequestHandler",
            vec![TypeRef::generic_array(var("Y")), concrete("String")],
        )),
    );
    b.declare(
        "ArrayRequestHandlerList",
        no_slots(),
        Some(TypeRef::parameterized(
            "ArrayGenericRequestHandler",
            vec![list_of(TypeRef::wildcard_extends(concrete("String")))],
        )),
    );
    b.declare(
        "WeirdArrayRequestHandlerList",
        ["Y"],
        Some(TypeRef::parameterized(
            "ArrayGenericRequestHandler",
            vec![list_of(TypeRef::wildcard_extends(var("Y")))],
        )),
    );
    b.declare(
        "WeirdArrayRequestHandlerListImpl",
        no_slots(),
        Some(TypeRef::parameterized(
            "WeirdArrayRequestHandlerList",
            vec![list_of(concrete("String"))],
        )),
    );

    b.declare(
        "WorkerRequestHandler",
        no_slots(),
        Some(TypeRef::parameterized(
            "AbstractRequestHandler",
            vec![list_of(concrete("String")), concrete("Boolean")],
        )),
    );

    b.declare(
        "AbstractUserRequestHandler",
        ["I", "O"],
        Some(TypeRef::parameterized(
            "AbstractRequestHandler",
            vec![var("I"), var("O")],
        )),
    );
    b.declare(
        "AbstractUniversityRequestHandler",
        ["I"],
        Some(TypeRef::parameterized(
            "AbstractUserRequestHandler",
            vec![var("I"), concrete("String")],
        )),
    );
    b.declare(
        "StudentRequestHandler",
        no_slots(),
        Some(TypeRef::parameterized(
            "AbstractUniversityRequestHandler",
            vec![concrete("Student")],
        )),
    );
    b.declare(
        "TeacherRequestHandler",
        no_slots(),
        Some(TypeRef::parameterized(
            "AbstractUniversityRequestHandler",
            vec![concrete("Teacher")],
        )),
    );

    Handlers {
        table: b.build().unwrap(),
        root,
    }
}

#[test]
fn test_user_handlers_resolve_through_two_generic_levels() {
    let h = handlers();
    assert_eq!(h.input_type("TeacherRequestHandler").unwrap(), concrete("Teacher"));
    assert_eq!(h.input_type("StudentRequestHandler").unwrap(), concrete("Student"));

    let resolver = TypeResolver::new(&h.table);
    let output = resolver
        .resolve_parameter(h.id("TeacherRequestHandler"), h.root, 1)
        .unwrap();
    assert_eq!(output, concrete("String"));
}

#[test]
fn test_resolved_type_maps_back_to_declaration() {
    let h = handlers();
    let resolver = TypeResolver::new(&h.table);
    let decl = resolver
        .resolve_parameter_declaration(h.id("TeacherRequestHandler"), h.root, 0)
        .unwrap();
    assert_eq!(decl, h.id("Teacher"));

    let err = resolver
        .resolve_parameter_declaration(h.id("WorkerRequestHandler"), h.root, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Metadata(MetadataError::DeclarationNotFound(name)) if name == "List"
    ));
}

#[test]
fn test_parameterized_binding_keeps_its_structure() {
    let h = handlers();
    let input = h.input_type("WorkerRequestHandler").unwrap();
    assert_eq!(input, list_of(concrete("String")));
    insta::assert_snapshot!(input.to_string(), @"List<String>");
}

#[test]
fn test_array_of_parameterized_type_is_generic_array() {
    let h = handlers();
    let input = h.input_type("ArrayRequestHandlerList").unwrap();
    assert_eq!(
        input,
        TypeRef::generic_array(list_of(TypeRef::wildcard_extends(concrete("String"))))
    );
    insta::assert_snapshot!(input.to_string(), @"List<? extends String>[]");
}

#[test]
fn test_wildcard_bound_is_refined_through_levels() {
    let h = handlers();
    let input = h.input_type("WeirdArrayRequestHandlerListImpl").unwrap();
    insta::assert_snapshot!(input.to_string(), @"List<? extends List<String>>[]");
}

#[test]
fn test_wildcard_bound_left_generic_is_unresolved() {
    let h = handlers();
    let err = h.input_type("WeirdArrayRequestHandlerList").unwrap_err();
    match err {
        ResolveError::UnresolvedParameter { parameter, resolved, leaf, .. } => {
            assert_eq!(parameter, "I");
            assert_eq!(resolved, "List<? extends Y>[]");
            assert_eq!(leaf, "WeirdArrayRequestHandlerList");
        }
        other => panic!("expected unresolved parameter, found {other:?}"),
    }
}

#[test]
fn test_array_of_unbound_variable_is_rejected() {
    let h = handlers();
    let err = h.input_type("ArrayGenericRequestHandler").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"array in the supertype of 'ArrayGenericRequestHandler' can't have generic component 'Y'"
    );
}

#[test]
fn test_concrete_array_binding() {
    let mut b = DeclarationTable::builder();
    let root = b.declare("Handler", ["I"], None);
    b.declare(
        "ArrayHandler",
        ["Y"],
        Some(TypeRef::parameterized(
            "Handler",
            vec![TypeRef::nested_generic_array(var("Y"), 2)],
        )),
    );
    let leaf = b.declare(
        "IntMatrixHandler",
        no_slots(),
        Some(TypeRef::parameterized("ArrayHandler", vec![concrete("Integer")])),
    );
    let table = b.build().unwrap();

    let input = TypeResolver::new(&table).resolve_parameter(leaf, root, 0).unwrap();
    assert_eq!(input, concrete("Integer[][]"));
}
