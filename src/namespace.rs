//! The namespace of console objects that completion candidates are drawn from.
//!
//! A namespace holds the global members visible at the prompt plus a table of
//! named types. A member either carries its children inline or refers to a type by
//! name; for methods the type is what the call returns, so request builders whose
//! methods return the builder itself can be chained indefinitely.
//!
//! Namespaces can be described in JSON:
//!
//! ```json
//! {
//!   "types": {
//!     "IndexRequestBuilder": { "index()": "IndexRequestBuilder", "execute()": null }
//!   },
//!   "globals": {
//!     "Requests": { "indexRequests": { "index()": "IndexRequestBuilder" } },
//!     "version": "1.0"
//!   }
//! }
//! ```
//!
//! Keys ending in `()` are methods. A JSON object value lists members inline, a
//! string names a type, anything else makes a plain property (or, for a method,
//! a call returning nothing completable).

use crate::{ConsoleError, extract_names, invalid_namespace, is_identifier_char};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{fmt, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Object,
    Method,
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Object => write!(f, "object"),
            MemberKind::Method => write!(f, "method"),
            MemberKind::Property => write!(f, "property"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    kind: MemberKind,
    type_name: Option<String>,
    members: IndexMap<String, Member>,
}

impl Member {
    fn new(kind: MemberKind) -> Self {
        Member {
            kind,
            type_name: None,
            members: IndexMap::new(),
        }
    }

    pub fn object() -> Self {
        Self::new(MemberKind::Object)
    }

    pub fn method() -> Self {
        Self::new(MemberKind::Method)
    }

    pub fn property() -> Self {
        Self::new(MemberKind::Property)
    }

    /// Sets the type of an object, or the return type of a method.
    pub fn of_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, member: Member) -> Self {
        self.members.insert(name.into(), member);
        self
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    fn label(&self, name: &str) -> String {
        match self.kind {
            MemberKind::Method => format!("{name}()"),
            _ => name.to_string(),
        }
    }
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// What to show in the candidate list, e.g. `index()`.
    pub display: String,
    /// What replaces the partial name, e.g. `index(`.
    pub replacement: String,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    types: IndexMap<String, Member>,
    globals: Member,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Namespace {
    /// An empty namespace: no globals, no types.
    pub fn new() -> Self {
        Namespace {
            types: IndexMap::new(),
            globals: Member::object(),
        }
    }

    pub fn with_type(mut self, name: impl Into<String>, definition: Member) -> Self {
        self.types.insert(name.into(), definition);
        self
    }

    pub fn with_global(mut self, name: impl Into<String>, member: Member) -> Self {
        self.globals.members.insert(name.into(), member);
        self
    }

    /// The objects the console exposes out of the box: the request factories
    /// under `Requests`, the `es` client shortcut, and the builders they return.
    pub fn builtin() -> Self {
        const INDEX: &[&str] = &[
            "index", "type", "id", "source", "routing", "parent", "timestamp", "ttl", "version", "refresh", "create", "opType",
        ];
        const GET: &[&str] = &["index", "type", "id", "fields", "routing", "preference", "refresh", "realtime"];
        const DELETE: &[&str] = &["index", "type", "id", "routing", "version", "refresh", "consistencyLevel"];
        const SEARCH: &[&str] = &["indices", "types", "source", "routing", "preference", "searchType", "scroll"];
        const COUNT: &[&str] = &["indices", "types", "query", "minScore", "routing"];
        const CREATE_INDEX: &[&str] = &["index", "settings", "mapping", "cause", "source", "timeout"];

        let client = Member::object()
            .with("index", Member::method().of_type("IndexRequestBuilder"))
            .with("get", Member::method().of_type("GetRequestBuilder"))
            .with("delete", Member::method().of_type("DeleteRequestBuilder"))
            .with("search", Member::method().of_type("SearchRequestBuilder"))
            .with("count", Member::method().of_type("CountRequestBuilder"))
            .with("createIndex", Member::method().of_type("CreateIndexRequestBuilder"));

        let requests = Member::object()
            .with("indexRequests", Member::object().with("index", Member::method().of_type("IndexRequestBuilder")))
            .with("getRequests", Member::object().with("get", Member::method().of_type("GetRequestBuilder")))
            .with("deleteRequests", Member::object().with("delete", Member::method().of_type("DeleteRequestBuilder")))
            .with("searchRequests", Member::object().with("search", Member::method().of_type("SearchRequestBuilder")))
            .with("countRequests", Member::object().with("count", Member::method().of_type("CountRequestBuilder")))
            .with(
                "indicesRequests",
                Member::object().with("createIndex", Member::method().of_type("CreateIndexRequestBuilder")),
            );

        Namespace::new()
            .with_type("IndexRequestBuilder", request_builder("IndexRequestBuilder", INDEX))
            .with_type("GetRequestBuilder", request_builder("GetRequestBuilder", GET))
            .with_type("DeleteRequestBuilder", request_builder("DeleteRequestBuilder", DELETE))
            .with_type("SearchRequestBuilder", request_builder("SearchRequestBuilder", SEARCH))
            .with_type("CountRequestBuilder", request_builder("CountRequestBuilder", COUNT))
            .with_type("CreateIndexRequestBuilder", request_builder("CreateIndexRequestBuilder", CREATE_INDEX))
            .with_global("Requests", requests)
            .with_global("es", client)
    }

    pub fn from_json(src: &str) -> Result<Self, ConsoleError> {
        let Value::Object(mut doc) = serde_json::from_str::<Value>(src)? else {
            return Err(invalid_namespace!("the document must be a JSON object"));
        };

        let mut namespace = Namespace::new();
        match doc.remove("types") {
            Some(Value::Object(types)) => {
                for (name, body) in &types {
                    let Value::Object(body) = body else {
                        return Err(invalid_namespace!("type '{name}' must be a JSON object"));
                    };
                    let mut definition = Member::object();
                    definition.members = parse_members(body)?;
                    namespace.types.insert(name.clone(), definition);
                }
            }
            Some(_) => return Err(invalid_namespace!("'types' must be a JSON object")),
            None => {}
        }
        match doc.remove("globals") {
            Some(Value::Object(globals)) => namespace.globals.members = parse_members(&globals)?,
            Some(_) => return Err(invalid_namespace!("'globals' must be a JSON object")),
            None => return Err(invalid_namespace!("missing 'globals'")),
        }
        if let Some(key) = doc.keys().next() {
            return Err(invalid_namespace!("unexpected top-level key '{key}'"));
        }

        namespace.validate()?;
        log::debug!(
            "loaded namespace: {} globals, {} types",
            namespace.globals.members.len(),
            namespace.types.len()
        );
        Ok(namespace)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConsoleError> {
        let path = path.as_ref();
        log::debug!("reading namespace from {}", path.display());
        let src = std::fs::read_to_string(path)?;
        Self::from_json(&src)
    }

    /// Checks that every type a member refers to is defined, and that no member
    /// has both a type and inline members.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        for (name, definition) in &self.types {
            self.check_type_refs(name, definition)?;
        }
        self.check_type_refs("", &self.globals)
    }

    fn check_type_refs(&self, path: &str, member: &Member) -> Result<(), ConsoleError> {
        if let Some(type_name) = &member.type_name
            && !self.types.contains_key(type_name)
        {
            return Err(invalid_namespace!("unknown type '{type_name}' referenced by '{path}'"));
        }
        if member.type_name.is_some() && !member.members.is_empty() {
            return Err(invalid_namespace!("'{path}' has both a type and inline members"));
        }
        for (name, child) in &member.members {
            let child_path = if path.is_empty() { name.clone() } else { format!("{path}.{name}") };
            self.check_type_refs(&child_path, child)?;
        }
        Ok(())
    }

    // a typed member takes its children from the type; `validate` rejects inline ones alongside
    fn members_of<'a>(&'a self, member: &'a Member) -> &'a IndexMap<String, Member> {
        match member.type_name.as_deref().and_then(|t| self.types.get(t)) {
            Some(definition) => &definition.members,
            None => &member.members,
        }
    }

    /// Walks `chain` from the global scope. An empty chain is the global scope.
    pub fn resolve<S: AsRef<str>>(&self, chain: &[S]) -> Result<&Member, ConsoleError> {
        let mut current = &self.globals;
        let mut path = String::new();
        for name in chain {
            let name = name.as_ref();
            if current.kind == MemberKind::Property {
                return Err(ConsoleError::NotAnObject { path });
            }
            current = self.members_of(current).get(name).ok_or_else(|| ConsoleError::UnknownMember {
                name: name.to_string(),
                path: if path.is_empty() { "global scope".to_string() } else { format!("'{path}'") },
            })?;
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(name);
        }
        Ok(current)
    }

    /// Candidates for the last name of `chain`, looked up among the members of
    /// whatever the preceding names resolve to. A chain that does not resolve
    /// has no candidates.
    pub fn complete<S: AsRef<str>>(&self, chain: &[S]) -> Vec<Candidate> {
        let Some((partial, parents)) = chain.split_last() else {
            return Vec::new();
        };
        let partial = partial.as_ref();
        let owner = match self.resolve(parents) {
            Ok(owner) => owner,
            Err(e) => {
                log::debug!("no completions for '{partial}': {e}");
                return Vec::new();
            }
        };

        self.members_of(owner)
            .iter()
            .filter(|(name, _)| name.starts_with(partial))
            .map(|(name, member)| Candidate {
                display: member.label(name),
                replacement: match member.kind {
                    MemberKind::Method => format!("{name}("),
                    _ => name.clone(),
                },
                kind: member.kind,
            })
            .collect()
    }

    /// Resolves the chain that ends `expression` and renders what it refers to:
    /// its kind, its type if any, then one member per line. An expression ending
    /// in a call describes the called method, and through it the returned type.
    pub fn describe(&self, expression: &str) -> Result<String, ConsoleError> {
        let expression = expression.trim_end();
        let mut chain = if expression.ends_with(')') {
            // a trailing call is only skipped when a separator follows it
            let chained = format!("{expression}.");
            extract_names(&chained, chained.len())
        } else {
            extract_names(expression, expression.len())
        };
        if chain.last().is_some_and(|name| name.is_empty()) {
            chain.pop();
        }
        let member = self.resolve(chain.as_slice())?;

        let title = if chain.is_empty() { "global scope".to_string() } else { chain.join(".") };
        let mut out = match member.type_name() {
            Some(type_name) => format!("{title}: {} {type_name}", member.kind),
            None => format!("{title}: {}", member.kind),
        };
        for (name, child) in self.members_of(member) {
            out.push_str("\n  ");
            out.push_str(&child.label(name));
        }
        Ok(out)
    }
}

fn request_builder(type_name: &str, methods: &[&str]) -> Member {
    methods
        .iter()
        .fold(Member::object(), |builder, method| builder.with(*method, Member::method().of_type(type_name)))
        .with("execute", Member::method())
}

fn parse_members(map: &Map<String, Value>) -> Result<IndexMap<String, Member>, ConsoleError> {
    let mut members = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let (name, mut member) = match key.strip_suffix("()") {
            Some(name) => (name, Member::method()),
            None if value.is_object() || value.is_string() => (key.as_str(), Member::object()),
            None => (key.as_str(), Member::property()),
        };
        if name.is_empty() || !name.chars().all(is_identifier_char) {
            return Err(invalid_namespace!("'{key}' is not a valid member name"));
        }
        match value {
            Value::Object(children) => member.members = parse_members(children)?,
            Value::String(type_name) => member.type_name = Some(type_name.clone()),
            _ => {}
        }
        if members.insert(name.to_string(), member).is_some() {
            return Err(invalid_namespace!("duplicate member '{name}'"));
        }
    }
    Ok(members)
}
