pub mod alert_sink;
pub mod fingerprinter;
pub mod masker;
pub mod notifier;
pub mod template_store;

pub use alert_sink::AlertHistorySink;
pub use fingerprinter::IFingerprinter;
pub use masker::ISqlMasker;
pub use notifier::INotifier;
pub use template_store::ITemplateStore;
