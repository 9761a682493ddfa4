//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects.

mod collection;
mod group;
mod profile;
mod subscription;
mod user;
