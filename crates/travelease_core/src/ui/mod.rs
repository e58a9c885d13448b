//! Page controller.
//!
//! # Responsibility
//! - Hold the rendered page and keep it in step with store notifications.
//! - Translate controls and bound elements into store operations.
//! - Route user-facing notices and confirmations through a `Prompt`.
//!
//! # Invariants
//! - Validation failures surface as one alert and leave state untouched.
//! - Destructive operations run only after the prompt confirms them.

pub mod app;
pub mod page;

pub use app::{App, Command, Control, Outcome};
pub use page::Page;

/// Blocking user dialogs.
pub trait Prompt {
    /// Shows a notice the traveler must acknowledge.
    fn alert(&mut self, message: &str);

    /// Asks a yes/no question; `true` means proceed.
    fn confirm(&mut self, question: &str) -> bool;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&mut self, question: &str) -> bool {
        (**self).confirm(question)
    }
}
