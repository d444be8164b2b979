//! Music info API integration
//!
//! Looks up release date, lyrics and link for an artist/title pair.
//! The service exposes a single endpoint:
//!
//! `GET <base>/info?group=<artist>&song=<title>`

pub mod dto;
mod adapter;
mod client;

pub use client::MusicInfoClient;
