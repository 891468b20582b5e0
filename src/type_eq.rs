use crate::accessor::Accessor;
use std::any::{Any, TypeId};
use std::convert::identity;

/// Proof that `A` and `B` are the same type.
///
/// Both directions are the identity function; they only exist because the
/// compiler cannot see the equality, and obtaining them requires the
/// `TypeId`s to match.
pub(crate) struct TypeEq<A, B> {
    forward: fn(A) -> B,
    backward: fn(B) -> A,
}

impl<A: 'static, B: 'static> TypeEq<A, B> {
    /// Returns the proof if `A` and `B` are exactly the same type
    pub(crate) fn new() -> Option<Self> {
        if TypeId::of::<A>() != TypeId::of::<B>() {
            return None;
        }

        let forward: fn(A) -> A = identity;
        let backward: fn(B) -> B = identity;
        Some(Self {
            forward: *(&forward as &dyn Any).downcast_ref::<fn(A) -> B>()?,
            backward: *(&backward as &dyn Any).downcast_ref::<fn(B) -> A>()?,
        })
    }

    pub(crate) fn cast(&self, value: A) -> B {
        (self.forward)(value)
    }

    pub(crate) fn cast_back(&self, value: B) -> A {
        (self.backward)(value)
    }
}

/// An `Accessor<A>` seen as an `Accessor<B>` once `A == B` is proven.
pub(crate) struct Recast<'p, A, B> {
    inner: &'p mut dyn Accessor<A>,
    eq: TypeEq<A, B>,
}

impl<'p, A, B> Recast<'p, A, B> {
    pub(crate) fn new(inner: &'p mut dyn Accessor<A>, eq: TypeEq<A, B>) -> Self {
        Self { inner, eq }
    }
}

impl<A: 'static, B: 'static> Accessor<B> for Recast<'_, A, B> {
    fn get(&self) -> B {
        self.eq.cast(self.inner.get())
    }

    fn set(&mut self, value: B) {
        self.inner.set(self.eq.cast_back(value))
    }
}
