//! # sovran-reflect
//!
//! Static property reflection with type-directed handler dispatch.
//!
//! An object declares a fixed, ordered list of named properties, each backed
//! by a getter/setter pair. A caller hands it a tuple of typed handlers, one
//! per value type it cares about. Every property is given to the first
//! handler whose value type is *exactly* the property's type, together with a
//! [`Property`] view that reads and writes the real storage. Properties no
//! handler accepts are skipped silently.
//!
//! ## Key Features
//!
//! - **Uniform access**: fields, closure pairs and getter/setter methods all
//!   reach handlers as the same [`Property`] get/set view
//! - **Exact matching**: no numeric widening, no subtype matching
//! - **Typed handlers**: a handler is a closure over `Property<V>`; its `V` is
//!   checked when the crate is compiled, not looked up by name
//! - **No macros**: properties are declared with plain method calls
//!
//! Value types are matched by `TypeId`, so they must be `'static`: an owned
//! `String` property works, a `&'a str` borrowed from the object does not.
//!
//! ## Usage Examples
//!
//! ### Reflecting an Object
//!
//! ```rust
//! use sovran_reflect::{handler, HandlerSet, Property, Reflect, Reflector};
//! use std::cell::RefCell;
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//!     height: f32,
//! }
//!
//! impl Person {
//!     fn height(&self) -> f32 {
//!         self.height
//!     }
//!
//!     fn set_height(&mut self, height: f32) {
//!         if height >= 0.0 {
//!             self.height = height;
//!         }
//!     }
//! }
//!
//! impl Reflect for Person {
//!     fn reflect<H: HandlerSet>(&mut self, handlers: H) {
//!         let mut r = Reflector::new(self, handlers);
//!         r.visit_ref("First Name", |p| &mut p.name);
//!         r.visit_fn("Age", |p| p.age, |p, age| p.age = age);
//!         r.visit_method("Height", Person::height, Person::set_height);
//!     }
//! }
//!
//! let mut person = Person {
//!     name: "John Smith".to_string(),
//!     age: 42,
//!     height: 1.8,
//! };
//!
//! let lines = RefCell::new(Vec::new());
//! person.reflect((
//!     handler(|name: &str, mut p: Property<i32>| {
//!         lines.borrow_mut().push(format!("{name}: {}", p.get()));
//!         if name == "Age" {
//!             p.set(p.get() + 1);
//!         }
//!     }),
//!     handler(|name: &str, p: Property<f32>| {
//!         lines.borrow_mut().push(format!("{name}: {}", p.get()));
//!     }),
//!     handler(|name: &str, p: Property<String>| {
//!         lines.borrow_mut().push(format!("{name}: {}", p.get()));
//!     }),
//! ));
//!
//! assert_eq!(
//!     lines.into_inner(),
//!     vec!["First Name: John Smith", "Age: 42", "Height: 1.8"]
//! );
//! assert_eq!(person.age, 43);
//! ```
//!
//! ### Refusing Shadowed Handlers
//!
//! A handler set may contain two handlers for the same type, in which case
//! only the first one is ever called. [`Reflector::with_policy`] can turn that
//! into an error instead:
//!
//! ```rust
//! use sovran_reflect::{handler, DuplicatePolicy, Property, ReflectError, Reflector};
//!
//! let mut count = 0u32;
//! let handlers = (
//!     handler(|_: &str, _: Property<u32>| {}),
//!     handler(|_: &str, _: Property<u32>| {}),
//! );
//!
//! match Reflector::with_policy(&mut count, handlers, DuplicatePolicy::Reject) {
//!     Ok(_) => println!("handler set is fine"),
//!     Err(ReflectError::DuplicateHandler(value_type)) => {
//!         assert_eq!(value_type.name(), "u32");
//!     }
//! }
//! ```
//!
//! ## Cargo Features
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)

mod logging;

mod accessor;
mod error;
mod handler;
mod reflector;
mod type_eq;

#[cfg(test)]
mod reflector_tests;

pub use accessor::{bind, functor, slot, Accessor, Bound, Functor, Property, Slot};
pub use error::ReflectError;
pub use handler::{handler, Handler, HandlerSet, TypedHandler, ValueType};
pub use reflector::{DuplicatePolicy, Reflect, Reflector, Summary, Visit};
