//! Star Glide: an endless side-scrolling arcade game for the terminal.
//!
//! Tap to fly, collect stars, avoid bombs.  The library holds the whole game;
//! the binary only wires it to a real terminal.

pub mod assets;
pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod menu;
pub mod scheduler;
pub mod world;
