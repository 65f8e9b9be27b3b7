use super::*;
use pretty_assertions::assert_eq;

#[test]
fn module_level_staticmethod_is_a_function() {
    let outline = outline_of(FIXTURE);
    let helper = find_by_name(&outline, "helper_function");
    assert_eq!(helper.kind, ElementKind::Function);
    assert_eq!(helper.decorators, vec!["staticmethod".to_string()]);
    assert_eq!(helper.span.start_line, 28);
    assert_eq!(helper.header_line, 29);
    assert_eq!(lines(helper), (28, 31));
}

#[test]
fn method_decorators_pick_the_kind() {
    let outline = outline_of(FIXTURE);
    let kinds: Vec<_> = ["BaseService.process", "BaseService.service_name", "ApiClient.from_env"]
        .into_iter()
        .map(|path| {
            let element = outline
                .find_path(path)
                .and_then(|id| outline.get(id))
                .unwrap_or_else(|| panic!("{path} missing"));
            (element.kind, element.primary_decorator())
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ElementKind::Method, Some("abstractmethod")),
            (ElementKind::Property, Some("property")),
            (ElementKind::Classmethod, Some("classmethod")),
        ]
    );
}

#[test]
fn decorated_class_span_starts_at_decorator() {
    let outline = outline_of(FIXTURE);
    let user = find_by_name(&outline, "User");
    assert_eq!(user.decorators, vec!["dataclass".to_string()]);
    assert_eq!(lines(user), (50, 56));
    assert_eq!(user.header_line, 51);
    assert!(FIXTURE[user.span.start_byte..].starts_with("@dataclass\nclass User:"));
}

#[test]
fn decorator_stack_keeps_source_order() {
    let source = "\
@app.route(\"/users\", methods=[\"GET\"])
# comment between decorators
@login_required
def users():
    pass
";
    let outline = outline_of(source);
    let users = find_by_name(&outline, "users");
    assert_eq!(
        users.decorators,
        vec![
            "app.route(\"/users\", methods=[\"GET\"])".to_string(),
            "login_required".to_string(),
        ]
    );
    assert_eq!(users.primary_decorator(), Some("route"));
    assert_eq!(lines(users), (1, 5));
}

#[test]
fn property_accessors_and_static_methods() {
    let source = "\
class Config:
    @property
    def name(self):
        return self._name

    @name.setter
    def name(self, value):
        self._name = value

    @staticmethod
    def parse(text):
        return Config()

    @functools.cached_property
    def size(self):
        return 0
";
    let outline = outline_of(source);
    let config = outline.find("Config").expect("class exists");
    let kinds: Vec<_> = outline.children(config).map(|(_, e)| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Property,
            ElementKind::Property,
            ElementKind::Staticmethod,
            ElementKind::Property,
        ]
    );
}

#[test]
fn dangling_decorator_attaches_without_extending_span() {
    let outline = outline_of("@register\nprint('between')\ndef handler():\n    pass\n");
    let handler = find_by_name(&outline, "handler");
    assert_eq!(handler.decorators, vec!["register".to_string()]);
    assert_eq!(lines(handler), (3, 4));
}

#[test]
fn decorator_at_end_of_file_is_dropped() {
    let outline = outline_of("def f():\n    pass\n\n@orphan\n");
    assert_eq!(child_names(&outline, ElementId::ROOT), vec!["f"]);
    assert!(find_by_name(&outline, "f").decorators.is_empty());
}

#[test]
fn context_manager_functions() {
    let source = "\
@contextlib.contextmanager
def session():
    yield connect()

@asynccontextmanager
async def lifespan(app):
    yield
";
    let outline = outline_of(source);
    let session = find_by_name(&outline, "session");
    assert_eq!(session.kind, ElementKind::ContextManager);
    assert!(session.is_generator);
    let lifespan = find_by_name(&outline, "lifespan");
    assert_eq!(lifespan.kind, ElementKind::ContextManager);
    assert!(lifespan.is_async);
}

#[test]
fn nested_decorated_function_stays_nested() {
    let outline = outline_of("def outer():\n    @wraps(fn)\n    def wrapper():\n        pass\n    return wrapper\n");
    let wrapper = find_by_name(&outline, "wrapper");
    assert_eq!(wrapper.kind, ElementKind::NestedFunction);
    assert_eq!(lines(wrapper), (2, 4));
}
