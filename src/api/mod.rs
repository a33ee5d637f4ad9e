mod client;
mod headers;
pub mod types;

#[cfg(test)]
pub use client::MockTalkingFaceApi;
pub use client::{HttpTalkingFaceClient, TalkingFaceApi};
