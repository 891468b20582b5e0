use crate::accessor::{Accessor, Property};
use crate::type_eq::{Recast, TypeEq};
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Identifies the value type a handler accepts
///
/// Two `ValueType`s are equal exactly when their `TypeId`s are; the name is
/// only kept for diagnostics.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The value type `V`
    pub fn of<V: 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: type_name::<V>(),
        }
    }

    /// The `TypeId` used for matching
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name, as given by `std::any::type_name`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this is exactly `V`
    pub fn is<V: 'static>(&self) -> bool {
        self.id == TypeId::of::<V>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueType").field(&self.name).finish()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A callback for properties of exactly one value type.
pub trait TypedHandler {
    /// The only value type this handler is ever offered
    type Value: 'static;

    fn handle(&mut self, name: &str, property: Property<'_, Self::Value>);
}

impl<H: TypedHandler> TypedHandler for &mut H {
    type Value = H::Value;

    fn handle(&mut self, name: &str, property: Property<'_, Self::Value>) {
        (**self).handle(name, property)
    }
}

/// A closure tagged with the value type it accepts. Build one with
/// [`handler`].
pub struct Handler<V, F> {
    callback: F,
    _value: PhantomData<fn(V)>,
}

impl<V, F> TypedHandler for Handler<V, F>
where
    V: 'static,
    F: for<'p> FnMut(&str, Property<'p, V>),
{
    type Value = V;

    fn handle(&mut self, name: &str, property: Property<'_, V>) {
        (self.callback)(name, property)
    }
}

impl<V, F> fmt::Debug for Handler<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("value", &type_name::<V>())
            .finish_non_exhaustive()
    }
}

/// Wraps a closure as a handler for properties of type `V`.
///
/// `V` comes from the closure's `Property<V>` parameter, or can be given
/// explicitly with `handler::<V, _>(..)`.
///
/// # Examples
///
/// ```
/// use sovran_reflect::{handler, slot, HandlerSet, Property};
///
/// let mut handlers = (
///     handler(|_: &str, mut p: Property<i32>| p.set(p.get() * 2)),
///     handler(|_: &str, mut p: Property<String>| p.set(p.get().to_uppercase())),
/// );
///
/// let mut count: i32 = 21;
/// assert!(handlers.dispatch("count", &mut slot(&mut count)));
/// assert_eq!(count, 42);
///
/// let mut flag = true;
/// assert!(!handlers.dispatch("flag", &mut slot(&mut flag)));
/// ```
pub fn handler<V, F>(callback: F) -> Handler<V, F>
where
    V: 'static,
    F: for<'p> FnMut(&str, Property<'p, V>),
{
    Handler {
        callback,
        _value: PhantomData,
    }
}

/// Offers a property to one handler, invoking it if the value types match
fn offer<H, V>(handler: &mut H, name: &str, accessor: &mut dyn Accessor<V>) -> bool
where
    H: TypedHandler,
    V: 'static,
{
    match TypeEq::<V, H::Value>::new() {
        Some(eq) => {
            let mut recast = Recast::new(accessor, eq);
            handler.handle(name, Property::new(&mut recast));
            true
        }
        None => false,
    }
}

/// An ordered, fixed-size set of typed handlers.
///
/// Implemented for `()` and for tuples of up to twelve [`TypedHandler`]s.
/// A property is handed to the first handler whose value type is exactly the
/// property's type; handlers further down the tuple with the same type are
/// never reached.
pub trait HandlerSet {
    /// The value type of each handler, in order
    fn value_types(&self) -> Vec<ValueType>;

    /// Offers a property to the set.
    ///
    /// Returns `true` if a handler accepted it, `false` if none matched, in
    /// which case nothing was called.
    fn dispatch<V: 'static>(&mut self, name: &str, accessor: &mut dyn Accessor<V>) -> bool;

    /// Value types accepted by more than one handler, each listed once in
    /// the order of its first occurrence
    fn duplicate_types(&self) -> Vec<ValueType> {
        let types = self.value_types();
        let mut duplicates: Vec<ValueType> = Vec::new();
        for (index, value_type) in types.iter().enumerate() {
            if types[..index].contains(value_type) && !duplicates.contains(value_type) {
                duplicates.push(*value_type);
            }
        }
        duplicates
    }
}

impl HandlerSet for () {
    fn value_types(&self) -> Vec<ValueType> {
        Vec::new()
    }

    fn dispatch<V: 'static>(&mut self, _name: &str, _accessor: &mut dyn Accessor<V>) -> bool {
        false
    }
}

impl<S: HandlerSet> HandlerSet for &mut S {
    fn value_types(&self) -> Vec<ValueType> {
        (**self).value_types()
    }

    fn dispatch<V: 'static>(&mut self, name: &str, accessor: &mut dyn Accessor<V>) -> bool {
        (**self).dispatch(name, accessor)
    }
}

macro_rules! impl_handler_set {
    ($($h:ident),+) => {
        impl<$($h: TypedHandler),+> HandlerSet for ($($h,)+) {
            fn value_types(&self) -> Vec<ValueType> {
                vec![$(ValueType::of::<<$h as TypedHandler>::Value>()),+]
            }

            #[allow(non_snake_case)]
            fn dispatch<V: 'static>(&mut self, name: &str, accessor: &mut dyn Accessor<V>) -> bool {
                let ($($h,)+) = self;
                $(
                    if offer($h, name, &mut *accessor) {
                        return true;
                    }
                )+
                false
            }
        }
    };
}

impl_handler_set!(H1);
impl_handler_set!(H1, H2);
impl_handler_set!(H1, H2, H3);
impl_handler_set!(H1, H2, H3, H4);
impl_handler_set!(H1, H2, H3, H4, H5);
impl_handler_set!(H1, H2, H3, H4, H5, H6);
impl_handler_set!(H1, H2, H3, H4, H5, H6, H7);
impl_handler_set!(H1, H2, H3, H4, H5, H6, H7, H8);
impl_handler_set!(H1, H2, H3, H4, H5, H6, H7, H8, H9);
impl_handler_set!(H1, H2, H3, H4, H5, H6, H7, H8, H9, H10);
impl_handler_set!(H1, H2, H3, H4, H5, H6, H7, H8, H9, H10, H11);
impl_handler_set!(H1, H2, H3, H4, H5, H6, H7, H8, H9, H10, H11, H12);
