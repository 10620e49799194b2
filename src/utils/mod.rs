// src/utils/mod.rs

pub mod html;
pub mod ip;
pub mod slug;
