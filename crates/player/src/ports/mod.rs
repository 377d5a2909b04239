//! Player port definitions.
//!
//! The controller only talks to the outside world through these traits: the
//! backend it calls, the view it renders into, and the platform it sleeps on.

pub mod outbound;
