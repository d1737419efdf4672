// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for dispatch semantics through the public API.

use std::sync::Arc;

use parking_lot::Mutex;
use publisher_lib::{EventTypeId, FailurePolicy, Publisher, PublisherConfig};

#[derive(Debug, Clone, PartialEq)]
struct Temperature(f32);

#[derive(Debug, Clone, PartialEq)]
struct Humidity(f32);

#[derive(Debug, Clone, PartialEq)]
struct Alert {
    message: String,
}

type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn log_temperature(publisher: &Publisher, log: &Log, tag: &'static str) -> publisher_lib::HandlerToken {
    let log = log.clone();
    publisher.subscribe(move |event: &mut Temperature| {
        log.lock().push(format!("{tag}:{}", event.0));
    })
}

// ============================================================================
// Type Identity
// ============================================================================

mod identity {
    use super::*;

    #[test]
    fn identities_are_stable_and_distinct() {
        assert_eq!(EventTypeId::of::<Temperature>(), EventTypeId::of::<Temperature>());
        assert_ne!(EventTypeId::of::<Temperature>(), EventTypeId::of::<Humidity>());
        assert_ne!(EventTypeId::of::<Humidity>(), EventTypeId::of::<Alert>());
    }

    #[test]
    fn token_records_event_type() {
        let publisher = Publisher::new();
        let token = publisher.subscribe(|_: &mut Humidity| {});
        assert_eq!(token.event_type(), EventTypeId::of::<Humidity>());
    }
}

// ============================================================================
// Delivery
// ============================================================================

mod delivery {
    use super::*;

    #[test]
    fn handlers_fire_once_each_in_order() {
        let publisher = Publisher::new();
        let log = new_log();

        log_temperature(&publisher, &log, "h1");
        log_temperature(&publisher, &log, "h2");
        log_temperature(&publisher, &log, "h3");

        publisher.publish(Temperature(21.5));

        assert_eq!(*log.lock(), vec!["h1:21.5", "h2:21.5", "h3:21.5"]);
    }

    #[test]
    fn publishing_other_type_does_not_reach_handler() {
        let publisher = Publisher::new();
        let log = new_log();
        log_temperature(&publisher, &log, "temp");

        publisher.publish(Humidity(40.0));
        publisher.publish(Alert {
            message: "hot".to_string(),
        });

        assert!(log.lock().is_empty());
    }

    #[test]
    fn publish_without_handlers_is_silent() {
        let publisher = Publisher::new();
        publisher.publish(Temperature(0.0));

        let report = publisher.publish_report(&mut Humidity(1.0));
        assert_eq!(report.delivered(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn handler_mutations_are_visible_to_caller() {
        let publisher = Publisher::new();
        publisher.subscribe(|event: &mut Alert| {
            event.message.push_str(" (seen)");
        });

        let mut alert = Alert {
            message: "hot".to_string(),
        };
        publisher.publish_mut(&mut alert);

        assert_eq!(alert.message, "hot (seen)");
    }
}

// ============================================================================
// Unsubscription
// ============================================================================

mod unsubscription {
    use super::*;

    #[test]
    fn removed_handler_no_longer_fires() {
        let publisher = Publisher::new();
        let log = new_log();

        let h1 = log_temperature(&publisher, &log, "h1");
        log_temperature(&publisher, &log, "h2");
        log_temperature(&publisher, &log, "h3");

        assert!(publisher.unsubscribe(h1));
        publisher.publish(Temperature(1.0));

        assert_eq!(*log.lock(), vec!["h2:1", "h3:1"]);
    }

    #[test]
    fn second_unsubscribe_returns_false() {
        let publisher = Publisher::new();
        let log = new_log();
        let token = log_temperature(&publisher, &log, "h");

        assert!(publisher.unsubscribe(token));
        assert!(!publisher.unsubscribe(token));
    }

    #[test]
    fn foreign_token_does_not_mutate_target() {
        let x = Publisher::new();
        let y = Publisher::new();
        let log = new_log();

        let token_x = log_temperature(&x, &log, "x");
        log_temperature(&y, &log, "y");

        assert!(!y.unsubscribe(token_x));
        y.publish(Temperature(2.0));
        x.publish(Temperature(3.0));

        assert_eq!(*log.lock(), vec!["y:2", "x:3"]);
    }
}

// ============================================================================
// Re-entrancy
// ============================================================================

mod reentrancy {
    use super::*;

    #[test]
    fn nested_publish_does_not_disturb_outer_pass() {
        let publisher = Arc::new(Publisher::new());
        let log = new_log();

        log_temperature(&publisher, &log, "before");

        let weak = Arc::downgrade(&publisher);
        publisher.subscribe(move |event: &mut Temperature| {
            if event.0 > 30.0
                && let Some(publisher) = weak.upgrade()
            {
                publisher.publish(Alert {
                    message: format!("too hot: {}", event.0),
                });
            }
        });

        log_temperature(&publisher, &log, "after");

        let alerts = log.clone();
        publisher.subscribe(move |event: &mut Alert| {
            alerts.lock().push(event.message.clone());
        });

        publisher.publish(Temperature(35.0));

        assert_eq!(
            *log.lock(),
            vec!["before:35", "too hot: 35", "after:35"]
        );
    }

    #[test]
    fn handler_can_unsubscribe_itself() {
        let publisher = Arc::new(Publisher::new());
        let own_token = Arc::new(Mutex::new(None));
        let calls = new_log();

        let weak = Arc::downgrade(&publisher);
        let token_slot = own_token.clone();
        let calls_clone = calls.clone();
        let token = publisher.subscribe(move |event: &mut Temperature| {
            calls_clone.lock().push(format!("once:{}", event.0));
            if let (Some(publisher), Some(token)) = (weak.upgrade(), token_slot.lock().take()) {
                assert!(publisher.unsubscribe(token));
            }
        });
        *own_token.lock() = Some(token);

        publisher.publish(Temperature(1.0));
        publisher.publish(Temperature(2.0));

        assert_eq!(*calls.lock(), vec!["once:1"]);
        assert!(publisher.is_empty());
    }
}

// ============================================================================
// Failure Policy
// ============================================================================

mod failure_policy {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn default_policy_propagates() {
        let publisher = Publisher::new();
        assert_eq!(publisher.config().failure_policy(), FailurePolicy::Propagate);

        let log = new_log();
        log_temperature(&publisher, &log, "first");
        publisher.subscribe(|_: &mut Temperature| panic!("sensor fault"));
        log_temperature(&publisher, &log, "last");

        let result = panic::catch_unwind(AssertUnwindSafe(|| publisher.publish(Temperature(5.0))));

        assert!(result.is_err());
        assert_eq!(*log.lock(), vec!["first:5"]);
    }

    #[test]
    fn isolate_policy_reports_failures() {
        let publisher = Publisher::with_config(
            PublisherConfig::new()
                .with_name("sensors")
                .with_failure_policy(FailurePolicy::Isolate),
        );

        let log = new_log();
        log_temperature(&publisher, &log, "first");
        publisher.subscribe(|_: &mut Temperature| panic!("sensor fault"));
        log_temperature(&publisher, &log, "last");

        let report = publisher.publish_report(&mut Temperature(5.0));

        assert_eq!(*log.lock(), vec!["first:5", "last:5"]);
        assert_eq!(report.delivered(), 2);
        assert_eq!(report.failures().len(), 1);
        assert!(report.failures()[0].to_string().contains("sensor fault"));
    }
}
