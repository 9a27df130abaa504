//! The two marker-annotation families and their decoded arguments.

mod binding;
mod marker;

pub use binding::BindingAnnotation;
pub use marker::{Marker, MarkerFamily, MarkerVariant, Multiplicity};
