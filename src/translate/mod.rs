pub mod interface;
pub mod client;

pub use interface::TranslateInterface;
pub use client::AzureTranslatorClient;
