use std::io;
use std::num::ParseIntError;
use std::sync::Arc;

use wiring::prelude::*;

pub struct Clock;

#[component]
impl Clock {
    #[inject]
    pub fn new() -> Self {
        Self
    }
}

pub struct Address {
    pub host: Arc<String>,
    pub port: u16,
}

#[component]
impl Address {
    #[inject]
    pub fn new(host: Arc<String>, #[alias("port")] raw_port: Arc<String>) -> Result<Self, ParseIntError> {
        Ok(Address {
            host,
            port: raw_port.parse()?,
        })
    }
}

pub struct Journal {
    pub clock: Arc<Clock>,
}

#[component]
impl Journal {
    #[inject]
    pub fn new(clock: Arc<Clock>) -> Journal {
        Journal { clock }
    }
}

pub struct Storage {
    pub r#type: Arc<String>,
}

#[component]
impl Storage {
    #[inject]
    pub fn new(r#type: Arc<String>) -> std::result::Result<Storage, io::Error> {
        if r#type.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty storage type"));
        }
        Ok(Storage { r#type })
    }
}

#[derive(Clone)]
pub struct Limits {
    pub default: u8,
    pub every: Vec<u8>,
    pub window: (u8, u8),
}

#[component(Limits, std::convert::identity)]
impl Limits {
    #[inject]
    pub fn new(
        #[alias("limit")] default: u8,
        #[all("limit")] every: Vec<u8>,
        #[alias("window")] (low, high): (u8, u8),
    ) -> Result<Limits, io::Error> {
        Ok(Limits {
            default,
            every,
            window: (low, high),
        })
    }
}

fn main() {}
