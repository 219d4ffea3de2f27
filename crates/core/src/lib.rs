//! HomeCover Skill Core
//!
//! Transport-agnostic implementation of the home-insurance voice skill: the
//! request and response envelopes, session attributes, the scripted handlers
//! and the dispatcher that ties them together. The HTTP service in
//! `homecover-api` is a thin host around [`skill::Skill`].

pub mod attributes;
pub mod document;
pub mod error;
pub mod handlers;
pub mod interceptor;
pub mod request;
pub mod response;
pub mod script;
pub mod skill;

pub use skill::{Skill, SkillBuilder};
