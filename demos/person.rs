use sovran_reflect::{
    handler, DuplicatePolicy, HandlerSet, Property, Reflect, ReflectError, Reflector,
};
use tracing_subscriber::EnvFilter;

struct Person {
    name: String,
    age: i32,
    height: f32,
}

impl Person {
    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        if height >= 0.0 {
            self.height = height;
        } else {
            tracing::warn!(height, "a person's height cannot be negative");
        }
    }
}

impl Reflect for Person {
    fn reflect<H: HandlerSet>(&mut self, handlers: H) {
        let mut r = Reflector::new(self, handlers);
        r.visit_ref("First Name", |p| &mut p.name);
        r.visit_fn("Age", |p| p.age, |p, age| p.age = age);
        r.visit_method("Height", Person::height, Person::set_height);
    }
}

fn main() -> Result<(), ReflectError> {
    // RUST_LOG=sovran_reflect=trace shows every dispatch decision
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut person = Person {
        name: "John Smith".to_string(),
        age: 42,
        height: 1.8,
    };

    person.reflect((
        handler(|name: &str, mut p: Property<i32>| {
            println!("Property \"{}\" of type int with value \"{}\".", name, p.get());
            if name == "Age" {
                p.set(p.get() + 1);
            }
        }),
        handler(|name: &str, p: Property<f32>| {
            println!("Property \"{}\" of type float with value \"{}\".", name, p.get());
        }),
        handler(|name: &str, p: Property<String>| {
            println!("Property \"{}\" of type string with value \"{}\".", name, p.get());
        }),
    ));
    println!("John's new age is {}.", person.age);

    // A negative height is refused by the setter and logged
    person.reflect((handler(|_: &str, mut p: Property<f32>| p.set(-1.0)),));
    println!("John's height is still {}.", person.height);

    // Two handlers for one type: only the first could ever run
    let shadowed = (
        handler(|_: &str, _: Property<i32>| println!("first int handler")),
        handler(|_: &str, _: Property<i32>| println!("second int handler")),
    );
    match Reflector::with_policy(&mut person, shadowed, DuplicatePolicy::Reject) {
        Ok(_) => println!("This shouldn't happen - the handler set has a duplicate"),
        Err(e) => println!("Rejected handler set: {}", e),
    }

    let mut r = Reflector::with_policy(&mut person, (), DuplicatePolicy::Reject)?;
    r.visit_ref("First Name", |p| &mut p.name);
    println!("With no handlers: {:?}", r.summary());

    Ok(())
}
