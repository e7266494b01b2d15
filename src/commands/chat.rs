// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-based transport for the bot. Each input line is a message; a line
//! starting with `!` presses the inline button with that callback data.

use crate::bot::{Bot, BotConfig, Keyboard, Reply, UserId};
use crate::sheet::{ExpenseSheet, SqliteSheet};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use tracing::info;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<i64>("user").copied().unwrap_or(1);
    let config = BotConfig::load(conn)?;
    let mut bot = Bot::new(SqliteSheet::new(conn), config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut bot, user, stdin.lock(), stdout.lock())
}

pub fn render_reply(reply: &Reply) -> String {
    let mut s = reply.text.trim_end().to_string();
    match &reply.keyboard {
        Keyboard::None => {}
        Keyboard::Main(rows) => {
            s.push('\n');
            for row in rows {
                let line: Vec<String> = row.iter().map(|label| format!("[{label}]")).collect();
                s.push_str(&format!("\n{}", line.join(" ")));
            }
        }
        Keyboard::Inline(rows) => {
            s.push('\n');
            for row in rows {
                let line: Vec<String> = row
                    .iter()
                    .map(|b| format!("[{}] !{}", b.label, b.data))
                    .collect();
                s.push_str(&format!("\n{}", line.join("   ")));
            }
        }
    }
    s
}

pub fn run<S, R, W>(bot: &mut Bot<S>, user: UserId, input: R, mut out: W) -> Result<()>
where
    S: ExpenseSheet,
    R: BufRead,
    W: Write,
{
    info!(user, "chat session started");
    let greeting = bot.handle_message(user, "/start", Utc::now());
    writeln!(out, "{}\n", render_reply(&greeting))?;

    for line in input.lines() {
        let line = line?;
        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }
        if cmd == "/quit" {
            break;
        }
        let reply = match cmd.strip_prefix('!') {
            Some(data) => bot.handle_callback(user, data),
            None => bot.handle_message(user, &line, Utc::now()),
        };
        writeln!(out, "{}\n", render_reply(&reply))?;
        out.flush()?;
    }
    info!(user, "chat session ended");
    Ok(())
}
