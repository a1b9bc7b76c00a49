//! Photo Guide
//!
//! 写真の構図を4つのルールで採点し、初心者向けのコーチガイドと
//! 画像編集AI向けのエキスパートプロンプトを生成するCLIツール

pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod scanner;
pub mod touchup;
