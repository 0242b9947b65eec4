// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive, interruptible pull transitions between two views.
//!
//! A drag gesture scrubs a reversible animation between an outgoing and an
//! incoming view. When the finger lifts, a hybrid threshold/velocity policy
//! decides whether the transition completes or cancels, and a damped spring
//! carries it to rest. A new drag on the container can catch that spring
//! mid-flight and take over again.
//!
//! The crate is headless: views are plain frame/visibility/interactivity
//! records, gesture samples are values the host feeds in, and every side
//! effect comes back as a [`event::TransitionEvent`].
//!
//! # Key entry points
//!
//! - [`coordinator::TransitionCoordinator`] - owns the animator pair and the
//!   transition in flight; the host's single point of contact
//! - [`interaction::InteractiveTransition`] - the gesture-driven state
//!   machine and its [`interaction::CompletionPolicy`]
//! - [`animation::PullAnimator`] - layouts, scrubbing and the momentum run
//! - [`trigger::PullTrigger`] - pull-to-dismiss / pull-to-pop detection on a
//!   scroll surface
//! - [`options::TransitionOptions`] - tuning constants with TOML presets
//!
//! # Flow
//!
//! gesture sample → controller scrubs the animator → `Progress` event →
//! release → policy decides → `Finished` event → spring run → tick →
//! `VisuallyCompleted` event → coordinator releases the transition.

pub mod animation;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod interaction;
pub mod options;
pub mod trigger;
pub mod util;
