//! Fixed-tick snake simulation with timed power-ups.
//!
//! The simulation ([`game::GameState`]) is deterministic and free of any
//! terminal or wall-clock dependency; the binary wires it to a crossterm
//! input reader, a [`clock::TickClock`] and a ratatui renderer.

pub mod clock;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod powerup;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod snapshot;
pub mod spawn;
pub mod ui;
