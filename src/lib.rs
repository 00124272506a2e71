//! edgefetch
//!
//! Typed single-call HTTP fetch with a closed error envelope, plus the two
//! clients LLM edge applications drive through it: a chat-completion client
//! and a Langfuse-style trace/span ingestion client.
//!
//! The core contract lives in [`fetch`]: one [`fetch::Request`] in, exactly
//! one [`fetch::ApiResult`] out. Every failure — bad status, non-JSON body,
//! elapsed deadline, or anything else the transport can produce — is a value
//! of [`fetch::RequestError`]; nothing is thrown past the executor.
//!
//! # Example
//!
//! ```rust,no_run
//! use edgefetch::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new();
//! let request = Request::get("https://api.example.com/models")
//!     .with_header("Authorization", "Bearer sk-...")
//!     .with_timeout(std::time::Duration::from_secs(10));
//!
//! match fetcher.fetch(&request).await {
//!     Ok(body) => println!("{}", body.display()),
//!     Err(RequestError::Timeout) => eprintln!("deadline elapsed"),
//!     Err(e) => eprintln!("request failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod chat;
pub mod fetch;
pub mod telemetry;

pub mod prelude;

pub use fetch::{ApiResult, Fetcher, Request, RequestError};
