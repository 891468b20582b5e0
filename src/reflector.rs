use crate::accessor::{Accessor, Bound, Functor, Slot};
use crate::error::ReflectError;
use crate::handler::HandlerSet;
use crate::logging::{debug, trace, warn};

/// What happened to a property offered to a [`Reflector`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// A handler accepted the property and was invoked once
    Dispatched,
    /// No handler accepts the property's value type; nothing was called
    Skipped,
}

/// Running counts of the properties a [`Reflector`] has been offered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Properties a handler was invoked for
    pub dispatched: usize,
    /// Properties no handler accepted
    pub skipped: usize,
}

/// How a reflector treats a handler set with several handlers for one type
///
/// Only the first handler for a type is ever invoked, whatever the policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Shadowed handlers are ignored silently
    #[default]
    Shadow,
    /// Shadowed handlers are reported through a warning log
    Warn,
    /// Construction fails with [`ReflectError::DuplicateHandler`]
    Reject,
}

/// Matches the properties of one object against a handler set.
///
/// A reflector borrows its target for as long as it lives. Each `visit_*`
/// call turns one property into an [`Accessor`] and hands it to the first
/// handler whose value type is exactly the property's type.
///
/// Matching goes through `TypeId`, so property value types must be
/// `'static`: a property can be a `String` or an `i32`, but not a `&'a str`
/// borrowed from the target.
///
/// # Examples
///
/// ```
/// use sovran_reflect::{handler, Property, Reflector, Visit};
///
/// struct Point { x: i32, y: i32, label: String }
///
/// let mut point = Point { x: 1, y: 2, label: "origin".to_string() };
/// let mut r = Reflector::new(
///     &mut point,
///     (handler(|_: &str, mut p: Property<i32>| p.update(|v| v * 10)),),
/// );
///
/// assert_eq!(r.visit_ref("x", |p| &mut p.x), Visit::Dispatched);
/// assert_eq!(r.visit_fn("y", |p| p.y, |p, y| p.y = y), Visit::Dispatched);
/// assert_eq!(r.visit_ref("label", |p| &mut p.label), Visit::Skipped);
/// assert_eq!(r.summary().dispatched, 2);
/// drop(r);
///
/// assert_eq!((point.x, point.y), (10, 20));
/// ```
pub struct Reflector<'a, T: ?Sized, H> {
    target: &'a mut T,
    handlers: H,
    summary: Summary,
}

impl<'a, T, H> Reflector<'a, T, H>
where
    T: ?Sized,
    H: HandlerSet,
{
    /// Binds `target` to `handlers`.
    ///
    /// Handlers that are shadowed by an earlier handler for the same type are
    /// tolerated, as with [`DuplicatePolicy::Shadow`].
    pub fn new(target: &'a mut T, handlers: H) -> Self {
        #[cfg(feature = "logging")]
        {
            let duplicates = handlers.duplicate_types();
            if !duplicates.is_empty() {
                debug!(
                    target_type = std::any::type_name::<T>(),
                    duplicates = ?duplicates,
                    "handler set shadows handlers"
                );
            }
        }

        Self::bind(target, handlers)
    }

    /// Binds `target` to `handlers`, checking the handler set against `policy`.
    ///
    /// With [`DuplicatePolicy::Warn`] a single warning lists every value type
    /// that has more than one handler.
    ///
    /// # Errors
    ///
    /// Returns `ReflectError::DuplicateHandler` for the first such value type
    /// if `policy` is [`DuplicatePolicy::Reject`].
    pub fn with_policy(
        target: &'a mut T,
        handlers: H,
        policy: DuplicatePolicy,
    ) -> Result<Self, ReflectError> {
        let duplicates = handlers.duplicate_types();
        if let Some(&first) = duplicates.first() {
            match policy {
                DuplicatePolicy::Shadow => {
                    debug!(
                        target_type = std::any::type_name::<T>(),
                        duplicates = ?duplicates,
                        "handler set shadows handlers"
                    );
                }
                DuplicatePolicy::Warn => {
                    warn!(
                        target_type = std::any::type_name::<T>(),
                        duplicates = ?duplicates,
                        "handler set has more than one handler for a value type"
                    );
                }
                DuplicatePolicy::Reject => return Err(ReflectError::DuplicateHandler(first)),
            }
        }

        Ok(Self::bind(target, handlers))
    }

    fn bind(target: &'a mut T, handlers: H) -> Self {
        Self {
            target,
            handlers,
            summary: Summary::default(),
        }
    }

    /// Offers a field of the target, read and written in place
    pub fn visit_ref<V, F>(&mut self, name: &str, field: F) -> Visit
    where
        V: Clone + 'static,
        F: FnOnce(&mut T) -> &mut V,
    {
        let mut slot = Slot::new(field(&mut *self.target));
        dispatch(&mut self.handlers, &mut self.summary, name, &mut slot)
    }

    /// Offers a property backed by a getter and setter closure over the target
    pub fn visit_fn<V, G, S>(&mut self, name: &str, get: G, set: S) -> Visit
    where
        V: 'static,
        G: Fn(&T) -> V,
        S: FnMut(&mut T, V),
    {
        let mut bound = Bound::new(&mut *self.target, get, set);
        dispatch(&mut self.handlers, &mut self.summary, name, &mut bound)
    }

    /// Offers a property backed by a getter and setter method on the target.
    ///
    /// The value type is the getter's return type and the setter must take
    /// exactly that type, e.g. `visit_method("Height", Person::height,
    /// Person::set_height)`.
    pub fn visit_method<V>(&mut self, name: &str, get: fn(&T) -> V, set: fn(&mut T, V)) -> Visit
    where
        V: 'static,
    {
        self.visit_fn(name, get, set)
    }

    /// Offers a property backed by closures that do not touch the target
    pub fn visit_functor<V, G, S>(&mut self, name: &str, get: G, set: S) -> Visit
    where
        V: 'static,
        G: Fn() -> V,
        S: FnMut(V),
    {
        self.visit_accessor(name, Functor::new(get, set))
    }

    /// Offers a property backed by any pre-built accessor
    pub fn visit_accessor<V, A>(&mut self, name: &str, mut accessor: A) -> Visit
    where
        V: 'static,
        A: Accessor<V>,
    {
        dispatch(&mut self.handlers, &mut self.summary, name, &mut accessor)
    }

    /// Counts of the properties dispatched and skipped so far
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Releases the target and returns the handler set
    pub fn into_handlers(self) -> H {
        self.handlers
    }
}

fn dispatch<H, V>(
    handlers: &mut H,
    summary: &mut Summary,
    name: &str,
    accessor: &mut dyn Accessor<V>,
) -> Visit
where
    H: HandlerSet,
    V: 'static,
{
    if handlers.dispatch(name, accessor) {
        trace!(
            property = name,
            value_type = std::any::type_name::<V>(),
            "dispatched"
        );
        summary.dispatched += 1;
        Visit::Dispatched
    } else {
        trace!(
            property = name,
            value_type = std::any::type_name::<V>(),
            "no handler, skipped"
        );
        summary.skipped += 1;
        Visit::Skipped
    }
}

/// Objects that expose their properties to a handler set.
///
/// An implementation binds a [`Reflector`] to `self` and visits every
/// property in a fixed order.
///
/// # Examples
///
/// ```
/// use sovran_reflect::{handler, HandlerSet, Property, Reflect, Reflector};
///
/// struct Person {
///     name: String,
///     age: i32,
///     height: f32,
/// }
///
/// impl Person {
///     fn height(&self) -> f32 {
///         self.height
///     }
///
///     fn set_height(&mut self, height: f32) {
///         if height >= 0.0 {
///             self.height = height;
///         }
///     }
/// }
///
/// impl Reflect for Person {
///     fn reflect<H: HandlerSet>(&mut self, handlers: H) {
///         let mut r = Reflector::new(self, handlers);
///         r.visit_ref("First Name", |p| &mut p.name);
///         r.visit_fn("Age", |p| p.age, |p, age| p.age = age);
///         r.visit_method("Height", Person::height, Person::set_height);
///     }
/// }
///
/// let mut person = Person { name: "John Smith".to_string(), age: 42, height: 1.8 };
/// person.reflect((
///     handler(|name: &str, mut p: Property<i32>| {
///         if name == "Age" {
///             p.set(p.get() + 1);
///         }
///     }),
///     handler(|_: &str, mut p: Property<f32>| p.set(-1.0)),
/// ));
///
/// assert_eq!(person.age, 43);
/// assert_eq!(person.height, 1.8);
/// assert_eq!(person.name, "John Smith");
/// ```
pub trait Reflect {
    fn reflect<H: HandlerSet>(&mut self, handlers: H);
}
