#![allow(dead_code)]

use leak_app::{start_local_node, timestamp_from_offset};
use leak_host::{Clock, Gateway, ManualClock, NodeConfig, NodeHandle, Timestamp};

pub const DESCRIPTION: &str = "my big secret";
pub const MESSAGE: &str = "i love kimchi";
pub const HOUR: i64 = 3600;

pub const AUTHOR_KEY: &str = "AAAAGYHZxhwjJXjnGEIiyDCyZJq+Prknbneb9gYe9teCKrGa";
pub const VIEWER_KEY: &str = "AAAAGqL3y7mTK0bBvbUWvFWSLvGdJrTWrH1mWiJlnRhSBDzi";

pub struct TestNetwork {
    pub node: NodeHandle,
    pub clock: ManualClock,
    pub author: Gateway,
    pub viewer: Gateway,
}

impl TestNetwork {
    pub fn start() -> Self {
        let clock = ManualClock::starting_now();
        let node = start_local_node(NodeConfig::default(), clock.clone());
        let author = Gateway::new(&node, AUTHOR_KEY);
        let viewer = Gateway::new(&node, VIEWER_KEY);
        Self {
            node,
            clock,
            author,
            viewer,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn time_in_past(&self) -> Timestamp {
        timestamp_from_offset(self.now(), -HOUR)
    }

    pub fn time_in_future(&self) -> Timestamp {
        timestamp_from_offset(self.now(), HOUR)
    }
}
