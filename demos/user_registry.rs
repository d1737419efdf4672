// SPDX-License-Identifier: MPL-2.0

//! User registry example.
//!
//! Demonstrates decoupling domain events from their side effects:
//!
//! 1. `UserService` publishes `UserCreated` / `UserRemoved`
//! 2. `EmailNotifier` greets new users and says goodbye to removed ones
//! 3. `LotteryService` reacts to `UserCreated` by publishing `UserWonLottery`
//!
//! Halfway through, the lottery reaction is unsubscribed, so the second
//! user gets a greeting but no prize.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example user_registry
//!
//! # With dispatcher logs
//! RUST_LOG=debug cargo run --example user_registry
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use publisher_lib::{Publisher, PublisherConfig, Subscribable};

#[derive(Debug)]
struct UserCreated {
    username: String,
    email: String,
}

#[derive(Debug)]
struct UserRemoved {
    username: String,
    email: String,
}

#[derive(Debug)]
struct UserWonLottery {
    username: String,
    email: String,
    prize_id: u64,
}

struct EmailNotifier;

impl EmailNotifier {
    fn on_user_created(&self, event: &UserCreated) {
        println!(
            "[to {}] Hello, {}, thanks for signing up!",
            event.email, event.username
        );
    }

    fn on_user_removed(&self, event: &UserRemoved) {
        println!("[to {}] Bye, {}!", event.email, event.username);
    }

    fn on_user_won_lottery(&self, event: &UserWonLottery) {
        println!(
            "[to {}] Hello, {}, you won lottery! (prize #{})",
            event.email, event.username, event.prize_id
        );
    }
}

struct LotteryService {
    publisher: Publisher,
}

impl LotteryService {
    const PRIZE_ID: u64 = 33133;

    fn new() -> Self {
        Self {
            publisher: Publisher::with_config(PublisherConfig::new().with_name("lottery")),
        }
    }

    fn on_user_created(&self, event: &mut UserCreated) {
        // Everybody wins.
        self.publisher.publish(UserWonLottery {
            username: std::mem::take(&mut event.username),
            email: std::mem::take(&mut event.email),
            prize_id: Self::PRIZE_ID,
        });
    }
}

impl Subscribable for LotteryService {
    fn publisher(&self) -> &Publisher {
        &self.publisher
    }
}

struct User {
    username: String,
    email: String,
}

struct UserService {
    publisher: Publisher,
    database: Mutex<HashMap<u64, User>>,
    last_id: Mutex<u64>,
}

impl UserService {
    fn new() -> Self {
        Self {
            publisher: Publisher::with_config(PublisherConfig::new().with_name("users")),
            database: Mutex::new(HashMap::new()),
            last_id: Mutex::new(0),
        }
    }

    fn create_user(&self, username: &str, email: &str) -> u64 {
        let id = {
            let mut last_id = self.last_id.lock();
            *last_id += 1;
            *last_id
        };

        self.database.lock().insert(
            id,
            User {
                username: username.to_string(),
                email: email.to_string(),
            },
        );

        self.publisher.publish(UserCreated {
            username: username.to_string(),
            email: email.to_string(),
        });
        id
    }

    fn remove_user(&self, id: u64) {
        // Release the database lock before handlers run.
        let removed = self.database.lock().remove(&id);
        if let Some(user) = removed {
            self.publisher.publish(UserRemoved {
                username: user.username,
                email: user.email,
            });
        }
    }
}

impl Subscribable for UserService {
    fn publisher(&self) -> &Publisher {
        &self.publisher
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let user_service = UserService::new();
    let notifier = Arc::new(EmailNotifier);
    let lottery_service = Arc::new(LotteryService::new());

    let n = notifier.clone();
    user_service.subscribe(move |event: &mut UserCreated| n.on_user_created(event));

    let lottery = lottery_service.clone();
    let lottery_token =
        user_service.subscribe(move |event: &mut UserCreated| lottery.on_user_created(event));

    let n = notifier.clone();
    lottery_service.subscribe(move |event: &mut UserWonLottery| n.on_user_won_lottery(event));

    let n = notifier.clone();
    user_service.subscribe(move |event: &mut UserRemoved| n.on_user_removed(event));

    let max_id = user_service.create_user("max", "max@some-mail.com");
    println!();

    // No more lottery for new users.
    user_service.unsubscribe(lottery_token);
    user_service.create_user("john", "john@some-mail.com");
    println!();

    user_service.remove_user(max_id);
}
