use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::{Arc, PoisonError, RwLock},
};

use log::{debug, warn};

use crate::{
    core::{
        builder::Scan,
        coerce::{CoerceContext, FromXmlText, coerce},
        list::build_item,
        path::{XmlPath, select_shortest},
    },
    error::{DefinitionError, MappingError, ValueFormatError},
    xml::StartElement,
};

/// A type whose fields are filled from an XML document.
///
/// Implementations declare, once, where each field lives relative to the type's element.
/// The declarations are compiled into a [`ClassDefinition`] the first time the type is used
/// and cached by the [`DefinitionRegistry`].
///
/// ```
/// use soap_xml_mapper::core::definition::{DefinitionBuilder, XmlObject};
///
/// #[derive(Debug, Default)]
/// struct Address {
///     city: String,
///     postal_code: String,
/// }
///
/// impl XmlObject for Address {
///     fn define(def: &mut DefinitionBuilder<Self>) {
///         def.field("City", |a, v| a.city = v)
///             .field("PostalCode", |a, v| a.postal_code = v);
///     }
/// }
/// ```
pub trait XmlObject: Default + 'static {
    fn define(def: &mut DefinitionBuilder<Self>);
}

/// How a binding obtains its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    /// Text content of the element at the binding path.
    ElementText,
    /// Named attribute of the element at the binding path.
    Attribute(String),
    /// A nested object of the given type, built from the element at the binding path.
    NestedObject(&'static str),
    /// One item of the given type per element matching the binding path.
    RepeatedNestedObject(&'static str),
}

impl BindingKind {
    fn is_element(&self) -> bool {
        !matches!(self, BindingKind::Attribute(_))
    }

    fn opens_child(&self) -> bool {
        matches!(
            self,
            BindingKind::NestedObject(_) | BindingKind::RepeatedNestedObject(_)
        )
    }

    fn conflicts_with(&self, other: &BindingKind) -> bool {
        match (self, other) {
            (BindingKind::Attribute(a), BindingKind::Attribute(b)) => a == b,
            (BindingKind::Attribute(_), _) | (_, BindingKind::Attribute(_)) => false,
            _ => true,
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::ElementText => f.write_str("element text"),
            BindingKind::Attribute(name) => write!(f, "attribute @{}", name),
            BindingKind::NestedObject(ty) => write!(f, "nested object {}", ty),
            BindingKind::RepeatedNestedObject(ty) => write!(f, "list of {}", ty),
        }
    }
}

pub(crate) type ValueSetter<T> = Box<
    dyn Fn(&mut T, &str, &CoerceContext<'_>) -> Result<bool, ValueFormatError> + Send + Sync,
>;

/// Builds the child value(s) of a nested or repeated binding straight from the token stream.
pub(crate) trait ChildBinding<T>: Send + Sync {
    /// Compiles the child type, failing when it declares nothing.
    fn check(
        &self,
        owner: &'static str,
        path: &str,
        registry: &DefinitionRegistry,
        compiling: &mut Compilation,
    ) -> Result<(), DefinitionError>;

    /// Consumes the element whose start was just read and stores the result into `target`.
    /// Returns whether anything was stored.
    fn build(
        &self,
        target: &mut T,
        scan: &mut Scan<'_>,
        start: &StartElement,
    ) -> Result<bool, MappingError>;
}

pub(crate) enum Assign<T> {
    Value(ValueSetter<T>),
    Child(Box<dyn ChildBinding<T>>),
}

/// One compiled field-to-path mapping.
pub struct FieldBinding<T> {
    declared: String,
    path: XmlPath,
    kind: BindingKind,
    value_type: &'static str,
    assign: Assign<T>,
}

impl<T> FieldBinding<T> {
    /// Path of the element carrying the value, relative to the enclosing element.
    pub fn path(&self) -> &XmlPath {
        &self.path
    }

    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }

    /// Name of the declared field type.
    pub fn value_type(&self) -> &'static str {
        self.value_type
    }

    /// The path as it was declared, attribute included.
    pub fn declared(&self) -> &str {
        &self.declared
    }

    pub(crate) fn assign(&self) -> &Assign<T> {
        &self.assign
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.kind, self.value_type)
    }
}

/// Comparable view of one binding, used to check that compilation is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    pub path: XmlPath,
    pub kind: BindingKind,
    pub value_type: &'static str,
}

/// The compiled binding table of one type.
pub struct ClassDefinition<T> {
    type_name: &'static str,
    node: XmlPath,
    bindings: Vec<FieldBinding<T>>,
}

impl<T> fmt::Debug for ClassDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("type_name", &self.type_name)
            .field("node", &self.node)
            .field("bindings", &self.bindings().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> ClassDefinition<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Document path at which a standalone instance of the type is found.
    pub fn node_path(&self) -> &XmlPath {
        &self.node
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = BindingInfo> + '_ {
        self.bindings.iter().map(|binding| BindingInfo {
            path: binding.path.clone(),
            kind: binding.kind.clone(),
            value_type: binding.value_type,
        })
    }

    /// Returns the element binding activated by the current stack, if any.
    pub fn resolve<S: AsRef<str>>(&self, stack: &[S]) -> Option<&FieldBinding<T>> {
        select_shortest(
            self.bindings
                .iter()
                .filter(|binding| binding.kind.is_element() && binding.path.matches(stack)),
            |binding| &binding.path,
        )
    }

    /// Returns every attribute binding whose element path the stack satisfies, with the
    /// attribute name to read.
    pub fn attributes_at<'d, S: AsRef<str>>(
        &'d self,
        stack: &'d [S],
    ) -> impl Iterator<Item = (&'d FieldBinding<T>, &'d str)> + 'd {
        self.bindings
            .iter()
            .filter_map(move |binding| match &binding.kind {
                BindingKind::Attribute(name) if binding.path.matches(stack) => {
                    Some((binding, name.as_str()))
                }
                _ => None,
            })
    }
}

impl<T: XmlObject> ClassDefinition<T> {
    fn compile(
        registry: &DefinitionRegistry,
        compiling: &mut Compilation,
    ) -> Result<Self, DefinitionError> {
        let mut builder = DefinitionBuilder::new();
        T::define(&mut builder);
        builder.finish(registry, compiling)
    }
}

/// Collects the declarations of one type.
pub struct DefinitionBuilder<T> {
    type_name: &'static str,
    node: Option<XmlPath>,
    bindings: Vec<FieldBinding<T>>,
    error: Option<DefinitionError>,
}

impl<T: XmlObject> DefinitionBuilder<T> {
    fn new() -> Self {
        Self {
            type_name: type_name::<T>(),
            node: None,
            bindings: Vec::new(),
            error: None,
        }
    }

    fn invalid(&mut self, path: &str, reason: &'static str) {
        if self.error.is_none() {
            self.error = Some(DefinitionError::InvalidPath {
                type_name: self.type_name,
                path: path.to_string(),
                reason,
            });
        }
    }

    /// Sets where a standalone instance of the type lives in a document.
    ///
    /// Defaults to `//TypeName`.
    pub fn node(&mut self, path: &str) -> &mut Self {
        match XmlPath::parse(path) {
            Ok(parsed) if parsed.attribute.is_some() => {
                self.invalid(path, "node path cannot name an attribute")
            }
            Ok(parsed) if parsed.element.is_own_element() => {
                self.invalid(path, "node path must name an element")
            }
            Ok(parsed) => self.node = Some(parsed.element),
            Err(reason) => self.invalid(path, reason),
        }
        self
    }

    /// Maps a scalar field. The path selects an attribute when its last segment is `@name`,
    /// and the element's text otherwise.
    pub fn field<V, F>(&mut self, path: &str, set: F) -> &mut Self
    where
        V: FromXmlText + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push_value(path, None, set)
    }

    /// Maps a scalar field whose dates use `date_format` instead of the parser-wide format.
    pub fn field_with_format<V, F>(&mut self, path: &str, date_format: &str, set: F) -> &mut Self
    where
        V: FromXmlText + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.push_value(path, Some(date_format.to_string()), set)
    }

    /// Maps a nested object built from the element at `path`.
    pub fn object<U, F>(&mut self, path: &str, set: F) -> &mut Self
    where
        U: XmlObject,
        F: Fn(&mut T, U) + Send + Sync + 'static,
    {
        let child = NestedObject {
            set: Box::new(set),
            _child: PhantomData,
        };
        self.push_child(
            path,
            BindingKind::NestedObject(type_name::<U>()),
            Box::new(child),
        )
    }

    /// Maps a repeated element: `push` is called once per matching element, in document
    /// order, with `None` for an item that was malformed or carried no mapped content.
    pub fn list<U, F>(&mut self, path: &str, push: F) -> &mut Self
    where
        U: XmlObject,
        F: Fn(&mut T, Option<U>) + Send + Sync + 'static,
    {
        let child = RepeatedObject {
            push: Box::new(push),
            _child: PhantomData,
        };
        self.push_child(
            path,
            BindingKind::RepeatedNestedObject(type_name::<U>()),
            Box::new(child),
        )
    }

    fn push_value<V, F>(&mut self, path: &str, date_format: Option<String>, set: F) -> &mut Self
    where
        V: FromXmlText + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let parsed = match XmlPath::parse(path) {
            Ok(parsed) => parsed,
            Err(reason) => {
                self.invalid(path, reason);
                return self;
            }
        };
        let kind = match parsed.attribute {
            Some(name) => BindingKind::Attribute(name),
            None => BindingKind::ElementText,
        };
        let setter: ValueSetter<T> = Box::new(
            move |target: &mut T,
                  raw: &str,
                  ctx: &CoerceContext<'_>|
                  -> Result<bool, ValueFormatError> {
                if raw.trim().is_empty() && !V::ACCEPTS_EMPTY {
                    return Ok(false);
                }
                let ctx = match &date_format {
                    Some(format) => CoerceContext {
                        date_format: format,
                    },
                    None => *ctx,
                };
                set(target, coerce::<V>(raw, &ctx)?);
                Ok(true)
            },
        );
        self.bindings.push(FieldBinding {
            declared: path.to_string(),
            path: parsed.element,
            kind,
            value_type: type_name::<V>(),
            assign: Assign::Value(setter),
        });
        self
    }

    fn push_child(
        &mut self,
        path: &str,
        kind: BindingKind,
        child: Box<dyn ChildBinding<T>>,
    ) -> &mut Self {
        let parsed = match XmlPath::parse(path) {
            Ok(parsed) => parsed,
            Err(reason) => {
                self.invalid(path, reason);
                return self;
            }
        };
        if parsed.attribute.is_some() {
            self.invalid(path, "object bindings cannot target an attribute");
            return self;
        }
        if parsed.element.is_own_element() {
            self.invalid(path, "object bindings must name a child element");
            return self;
        }
        let value_type = match kind {
            BindingKind::NestedObject(ty) | BindingKind::RepeatedNestedObject(ty) => ty,
            _ => "",
        };
        self.bindings.push(FieldBinding {
            declared: path.to_string(),
            path: parsed.element,
            kind,
            value_type,
            assign: Assign::Child(child),
        });
        self
    }

    fn finish(
        self,
        registry: &DefinitionRegistry,
        compiling: &mut Compilation,
    ) -> Result<ClassDefinition<T>, DefinitionError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.bindings.is_empty() {
            return Err(DefinitionError::NoBindings {
                type_name: self.type_name,
            });
        }

        for (idx, binding) in self.bindings.iter().enumerate() {
            for prior in &self.bindings[..idx] {
                if prior.path == binding.path && prior.kind.conflicts_with(&binding.kind) {
                    return Err(DefinitionError::Conflict {
                        type_name: self.type_name,
                        path: binding.declared.clone(),
                        first: prior.describe(),
                        second: binding.describe(),
                    });
                }
            }
        }

        for binding in &self.bindings {
            let shadowed_by = self.bindings.iter().find(|other| {
                other.kind.opens_child() && other.path.is_strict_prefix_of(&binding.path)
            });
            if let Some(other) = shadowed_by {
                warn!(
                    "Binding {:?} of {} is unreachable: {:?} opens a nested object first",
                    binding.declared, self.type_name, other.declared
                );
            }
        }

        for binding in &self.bindings {
            if let Assign::Child(child) = &binding.assign {
                child.check(self.type_name, &binding.declared, registry, compiling)?;
            }
        }

        let node = match self.node {
            Some(node) => node,
            None => {
                let default = format!("//{}", short_type_name(self.type_name));
                XmlPath::parse(&default)
                    .map_err(|reason| DefinitionError::InvalidPath {
                        type_name: self.type_name,
                        path: default.clone(),
                        reason,
                    })?
                    .element
            }
        };

        debug!(
            "Compiled {} bindings for {} (node {})",
            self.bindings.len(),
            self.type_name,
            node
        );

        Ok(ClassDefinition {
            type_name: self.type_name,
            node,
            bindings: self.bindings,
        })
    }
}

/// Last segment of a type path: `my_crate::model::Order` gives `Order`.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

struct NestedObject<T, U> {
    set: Box<dyn Fn(&mut T, U) + Send + Sync>,
    _child: PhantomData<fn() -> U>,
}

impl<T: XmlObject, U: XmlObject> ChildBinding<T> for NestedObject<T, U> {
    fn check(
        &self,
        owner: &'static str,
        path: &str,
        registry: &DefinitionRegistry,
        compiling: &mut Compilation,
    ) -> Result<(), DefinitionError> {
        registry.ensure_child::<U>(owner, path, compiling)
    }

    fn build(
        &self,
        target: &mut T,
        scan: &mut Scan<'_>,
        start: &StartElement,
    ) -> Result<bool, MappingError> {
        let definition = scan.registry().definition::<U>()?;
        let (value, assigned) = scan.build_object(&definition, start)?;
        (self.set)(target, value);
        Ok(assigned > 0)
    }
}

struct RepeatedObject<T, U> {
    push: Box<dyn Fn(&mut T, Option<U>) + Send + Sync>,
    _child: PhantomData<fn() -> U>,
}

impl<T: XmlObject, U: XmlObject> ChildBinding<T> for RepeatedObject<T, U> {
    fn check(
        &self,
        owner: &'static str,
        path: &str,
        registry: &DefinitionRegistry,
        compiling: &mut Compilation,
    ) -> Result<(), DefinitionError> {
        registry.ensure_child::<U>(owner, path, compiling)
    }

    fn build(
        &self,
        target: &mut T,
        scan: &mut Scan<'_>,
        start: &StartElement,
    ) -> Result<bool, MappingError> {
        let definition = scan.registry().definition::<U>()?;
        let item = build_item(scan, &definition, start)?;
        let stored = item.is_some();
        (self.push)(target, item);
        Ok(stored)
    }
}

/// Process-lifetime cache of compiled definitions, keyed by type.
///
/// Construct one at startup and share it (by reference or `Arc`) with every parser.
/// Entries are never invalidated.
#[derive(Default)]
pub struct DefinitionRegistry {
    definitions: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl fmt::Debug for DefinitionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of compiled definitions held.
    pub fn len(&self) -> usize {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the definition of `T`, compiling and caching it (and every type it nests)
    /// on first use.
    ///
    /// Nothing is cached unless the whole graph reachable from `T` compiles.
    pub fn definition<T: XmlObject>(&self) -> Result<Arc<ClassDefinition<T>>, DefinitionError> {
        if let Some(definition) = self.cached::<T>() {
            return Ok(definition);
        }
        let mut compilation = Compilation::default();
        let definition = self.compile::<T>(&mut compilation)?;
        self.commit(compilation);
        Ok(self.cached::<T>().unwrap_or(definition))
    }

    fn cached<T: XmlObject>(&self) -> Option<Arc<ClassDefinition<T>>> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<ClassDefinition<T>>>())
            .cloned()
    }

    fn compile<T: XmlObject>(
        &self,
        compiling: &mut Compilation,
    ) -> Result<Arc<ClassDefinition<T>>, DefinitionError> {
        compiling.in_progress.push(TypeId::of::<T>());
        let compiled = ClassDefinition::<T>::compile(self, compiling);
        compiling.in_progress.pop();
        let definition = Arc::new(compiled?);
        compiling
            .staged
            .insert(TypeId::of::<T>(), Box::new(definition.clone()));
        Ok(definition)
    }

    /// First writer wins: a concurrent compilation of the same type is discarded.
    fn commit(&self, compilation: Compilation) {
        let mut definitions = self
            .definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (id, definition) in compilation.staged {
            definitions.entry(id).or_insert(definition);
        }
    }

    fn ensure_child<U: XmlObject>(
        &self,
        owner: &'static str,
        path: &str,
        compiling: &mut Compilation,
    ) -> Result<(), DefinitionError> {
        let id = TypeId::of::<U>();
        // A type currently being compiled is checked by its own compilation.
        if compiling.in_progress.contains(&id)
            || compiling.staged.contains_key(&id)
            || self.cached::<U>().is_some()
        {
            return Ok(());
        }
        match self.compile::<U>(compiling) {
            Ok(_) => Ok(()),
            Err(DefinitionError::NoBindings { type_name: child }) if child == type_name::<U>() => {
                Err(DefinitionError::EmptyChild {
                    type_name: owner,
                    path: path.to_string(),
                    child_type: child,
                })
            }
            Err(error) => Err(error),
        }
    }
}

/// State of one top-level compilation: the types on the current path, and the definitions
/// compiled so far, held back until the outermost type succeeds.
#[derive(Default)]
pub(crate) struct Compilation {
    in_progress: Vec<TypeId>,
    staged: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}
