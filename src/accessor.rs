use std::fmt;

/// Uniform read/write access to one value of type `V`.
///
/// An accessor owns no data of its own: it is a view over some storage (a
/// field, a pair of closures, a getter/setter pair on an object) and cannot
/// outlive what it borrows.
///
/// `set` is fire-and-forget. An accessor backed by a validating setter may
/// reject a value, in which case `get` keeps returning the previous one, but
/// it never applies a value partially.
pub trait Accessor<V> {
    /// Returns the current value
    fn get(&self) -> V;

    /// Requests that the value be replaced with `value`
    fn set(&mut self, value: V);
}

impl<V, A> Accessor<V> for &mut A
where
    A: Accessor<V> + ?Sized,
{
    fn get(&self) -> V {
        (**self).get()
    }

    fn set(&mut self, value: V) {
        (**self).set(value)
    }
}

/// Accessor over a mutable slot: reads clone it, writes replace it.
///
/// # Examples
///
/// ```
/// use sovran_reflect::{slot, Accessor};
///
/// let mut name = String::from("John Smith");
/// let mut accessor = slot(&mut name);
/// accessor.set("Jane Smith".to_string());
/// assert_eq!(accessor.get(), "Jane Smith");
/// ```
pub struct Slot<'a, V> {
    value: &'a mut V,
}

impl<'a, V> Slot<'a, V> {
    /// Wraps a mutable slot
    pub fn new(value: &'a mut V) -> Self {
        Self { value }
    }
}

impl<V: Clone> Accessor<V> for Slot<'_, V> {
    fn get(&self) -> V {
        self.value.clone()
    }

    fn set(&mut self, value: V) {
        *self.value = value;
    }
}

/// Creates an accessor that reads and writes `value` directly
pub fn slot<V: Clone>(value: &mut V) -> Slot<'_, V> {
    Slot::new(value)
}

/// Accessor over a pre-built getter/setter closure pair.
///
/// The closures are called unchanged, so whatever storage they capture is
/// what gets read and written.
///
/// # Examples
///
/// ```
/// use sovran_reflect::{functor, Accessor};
/// use std::cell::Cell;
///
/// let age = Cell::new(42);
/// let mut accessor = functor(|| age.get(), |a| age.set(a));
/// accessor.set(accessor.get() + 1);
/// assert_eq!(age.get(), 43);
/// ```
pub struct Functor<G, S> {
    get: G,
    set: S,
}

impl<G, S> Functor<G, S> {
    /// Wraps a getter and a setter closure unchanged
    pub fn new(get: G, set: S) -> Self {
        Self { get, set }
    }
}

impl<V, G, S> Accessor<V> for Functor<G, S>
where
    G: Fn() -> V,
    S: FnMut(V),
{
    fn get(&self) -> V {
        (self.get)()
    }

    fn set(&mut self, value: V) {
        (self.set)(value)
    }
}

/// Creates an accessor from a getter and a setter closure
pub fn functor<V, G, S>(get: G, set: S) -> Functor<G, S>
where
    G: Fn() -> V,
    S: FnMut(V),
{
    Functor::new(get, set)
}

/// Accessor that routes reads and writes through a getter and setter on a
/// borrowed target.
///
/// The target is borrowed, never copied, so writes land on the real object.
/// Methods work as well as closures, since `T::getter` is a `Fn(&T) -> V`.
///
/// # Examples
///
/// ```
/// use sovran_reflect::{bind, Accessor};
///
/// struct Person { height: f32 }
///
/// impl Person {
///     fn height(&self) -> f32 { self.height }
///     fn set_height(&mut self, height: f32) {
///         if height >= 0.0 {
///             self.height = height;
///         }
///     }
/// }
///
/// let mut person = Person { height: 1.8 };
/// let mut accessor = bind(&mut person, Person::height, Person::set_height);
/// accessor.set(-1.0);
/// assert_eq!(accessor.get(), 1.8);
/// accessor.set(2.5);
/// assert_eq!(person.height, 2.5);
/// ```
pub struct Bound<'a, T: ?Sized, G, S> {
    target: &'a mut T,
    get: G,
    set: S,
}

impl<'a, T: ?Sized, G, S> Bound<'a, T, G, S> {
    /// Borrows `target` for the accessor's lifetime
    pub fn new(target: &'a mut T, get: G, set: S) -> Self {
        Self { target, get, set }
    }
}

impl<T, V, G, S> Accessor<V> for Bound<'_, T, G, S>
where
    T: ?Sized,
    G: Fn(&T) -> V,
    S: FnMut(&mut T, V),
{
    fn get(&self) -> V {
        (self.get)(&*self.target)
    }

    fn set(&mut self, value: V) {
        (self.set)(&mut *self.target, value)
    }
}

/// Creates an accessor from a getter and setter over `target`.
///
/// The value type is taken from the getter's return type; a setter that
/// takes anything else does not compile.
pub fn bind<T, V, G, S>(target: &mut T, get: G, set: S) -> Bound<'_, T, G, S>
where
    T: ?Sized,
    G: Fn(&T) -> V,
    S: FnMut(&mut T, V),
{
    Bound::new(target, get, set)
}

/// The view of a property that a handler receives.
///
/// Wraps whichever accessor backs the property, so a handler sees the same
/// `get`/`set` interface no matter how the property is stored.
pub struct Property<'p, V> {
    accessor: &'p mut dyn Accessor<V>,
}

impl<'p, V> Property<'p, V> {
    /// Wraps the accessor backing a property
    pub fn new(accessor: &'p mut dyn Accessor<V>) -> Self {
        Self { accessor }
    }

    /// Returns the property's current value
    pub fn get(&self) -> V {
        self.accessor.get()
    }

    /// Writes a new value through the property's setter
    pub fn set(&mut self, value: V) {
        self.accessor.set(value)
    }

    /// Reads the value, passes it through `f`, and writes the result back
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_reflect::{slot, Property};
    ///
    /// let mut age = 42;
    /// let mut accessor = slot(&mut age);
    /// Property::new(&mut accessor).update(|a| a + 1);
    /// assert_eq!(age, 43);
    /// ```
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(V) -> V,
    {
        let value = self.accessor.get();
        self.accessor.set(f(value));
    }
}

impl<V> Accessor<V> for Property<'_, V> {
    fn get(&self) -> V {
        self.accessor.get()
    }

    fn set(&mut self, value: V) {
        self.accessor.set(value)
    }
}

impl<V: fmt::Debug> fmt::Debug for Property<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.accessor.get()).finish()
    }
}
