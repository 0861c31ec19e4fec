// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Rancher Ensure
//!
//! Idempotent "ensure" tools for Rancher 1.x (`v2-beta` API): make a stack
//! or a set of services exist in an environment, and say through the exit
//! code whether anything changed.
//!
//! ## Overview
//!
//! Two binaries share this library:
//!
//! - `rancher-ensure-stack` creates a stack, or updates it when its
//!   description or compose files differ from the desired ones
//! - `rancher-ensure-service` creates the named services that are missing
//!   from a stack and never modifies existing ones
//!
//! Both exit with `0` when nothing changed, `50` when something was
//! created or updated and `1` on failure, so they can drive configuration
//! management tools that distinguish "ok" from "changed".
//!
//! ## Architecture
//!
//! 1. **Names**: environment, stack and service names are resolved to IDs,
//!    first match wins
//! 2. **Comparison**: current and desired configuration are compared under
//!    a named [`planner::ComparePolicy`]
//! 3. **Reconciler**: creates or updates and reports a typed outcome
//!
//! ## Modules
//!
//! - [`config`]: Settings file, environment layering and validation
//! - [`rancher`]: Rancher API client, resources and name resolution
//! - [`planner`]: Configuration comparison policies
//! - [`reconciler`]: Stack and service reconciliation
//! - [`cli`]: Command-line interface
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```yaml
//! rancher:
//!   url: http://rancher.internal:8080/
//!   access_key: 0123456789ABCDEF
//!
//! service:
//!   image: nginx:1.25
//!   labels:
//!     io.rancher.container.pull_image: always
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod rancher;
pub mod reconciler;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{OutputFormatter, ServiceCli, StackCli};
pub use config::{ConfigParser, ConfigValidator, RancherConnection, Settings};
pub use error::{RancherEnsureError, Result};
pub use planner::{ComparePolicy, ConfigMap};
pub use rancher::{Lookup, RancherApi, RancherClient, Resolver};
pub use reconciler::{Outcome, ReconcileReport, ServiceReconciler, StackReconciler};
