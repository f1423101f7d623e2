//! Socket input path for the maker-only gateway.
//!
//! # Key Components
//!
//! - [`InputDispatcher`]: one typed method per outbound message family;
//!   order submission and update route their flags through the shared
//!   post-only enforcer before the payload leaves the process
//! - [`InputSender`]: boundary to the connection manager owning the
//!   socket (serialization, queuing and transmission live behind it)
//! - [`InputHandle`]: channel-backed sender for the real transport
//! - [`MockInputSender`]: recording sender for tests

pub mod error;
pub mod input;
pub mod outbound;

pub use error::{WsInputError, WsInputResult};
pub use input::{
    CancelOrder, CancelOrderMulti, InputDispatcher, SubmitFundingOffer, SubmitOrder, UpdateOrder,
};
pub use outbound::{
    BoxFuture, DynInputSender, InputEnvelope, InputHandle, InputSender, MockInputSender,
};
