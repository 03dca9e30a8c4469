//! Server-side HTML rendering.
//!
//! Pages are self-contained documents built with `format!` templates and
//! inline CSS; all dynamic text goes through `escape_html`.

pub mod faq;
pub mod home;
pub mod info;
pub mod layout;
pub mod prediction;
pub mod testimonials;

pub use faq::render_faq;
pub use home::render_home;
pub use info::{render_features, render_statistics};
pub use layout::{escape_html, Page};
pub use prediction::{poll_interval, render_prediction, PredictionView, DISCLAIMER};
pub use testimonials::render_testimonials;
