//! Core dispatch types.

mod builder;
mod notifier;

pub use builder::ChangeNotifierBuilder;
pub use notifier::ChangeNotifier;
