//! bouncer-handler: the deployed redirect function
//!
//! Every invocation answers with a redirect to `REDIRECT_URI`, or a 500 when it is not set.
//! [`respond`] is the handler itself; [`runtime`] connects it to the function platform.
//!
//! The `bouncer build` pipeline packages the Deno entry point `main.ts` at the project root,
//! not this crate. The `bootstrap` binary answers with the same responses for a custom
//! runtime and has to be packaged separately (built for the target and zipped as
//! `bootstrap`).

mod response;
pub mod runtime;

pub use response::{LOCATION_NOT_SET, ProxyResponse, REDIRECT_ENV_VAR, respond, respond_from_env};
