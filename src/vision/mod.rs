pub mod interface;
pub mod client;

pub use interface::VisionInterface;
pub use client::AzureVisionClient;
