// src/logging.rs
//! `log` クレートのマクロ (info! とか warn! とか) の出力先を用意するよ。
//!
//! wasm ではブラウザの console.log に、ネイティブ (テストなど) では stderr に出す。

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// JavaScript の console.log を Rust から呼び出すための準備 (extern ブロック)。
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

pub struct ConsoleLogger {
    level: LevelFilter,
}

// レベルの絞り込みは log::set_max_level に任せるので、ここでは全部通す
static LOGGER: ConsoleLogger = ConsoleLogger { level: LevelFilter::Trace };

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());

        #[cfg(target_arch = "wasm32")]
        console_log(&line);
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", line);
    }

    fn flush(&self) {}
}

/// ロガーを登録する。2 回目以降の呼び出しはレベルを変えるだけ。
pub fn init_logger(level: LevelFilter) {
    // set_logger は 1 回しか成功しないので、失敗しても気にしない
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
