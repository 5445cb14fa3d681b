//! Fixture types registered for introspection

#![allow(dead_code)]

use std::rc::Rc;

use ma_engine::{introspect, symbolic};

#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    pub name: String,
    pub age: i32,
    pub toy: Option<String>,
}

introspect! {
    Dog as "fixtures::Dog", eq {
        name,
        age,
        toy,
    }
}

impl Dog {
    pub fn new(name: &str, age: i32, toy: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            age,
            toy: toy.map(str::to_string),
        }
    }
}

/// The dog of most scenarios
pub fn youpi() -> Dog {
    Dog::new("youpi", 5, None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanType {
    Tall,
    Thin,
    Big,
}

symbolic! {
    HumanType as "fixtures::HumanType" {
        Tall => "TALL",
        Thin => "THIN",
        Big => "BIG",
    }
}

#[derive(Debug, Clone)]
pub struct Human {
    pub name: Option<String>,
    pub surname: String,
    pub address: String,
    pub age: i32,
    pub human_type: HumanType,
    pub wannabe: HumanType,
    pub friend: Option<Rc<Human>>,
    pub dog: Option<Rc<Dog>>,
}

impl Human {
    pub const SPECIES: &'static str = "homo sapiens";
}

introspect! {
    Human as "fixtures::Human" {
        pub name,
        surname,
        address,
        pub age,
        human_type,
        wannabe,
        friend,
        dog,
        const SPECIES,
    }
}

/// A human owning `dog`, with no name and no friend
pub fn human(address: &str, age: i32, dog: Option<Rc<Dog>>) -> Human {
    Human {
        name: None,
        surname: "Doe".to_string(),
        address: address.to_string(),
        age,
        human_type: HumanType::Tall,
        wannabe: HumanType::Big,
        friend: None,
        dog,
    }
}

#[derive(Debug, Clone)]
pub struct Scale {
    pub reading: f64,
    pub unit: String,
}

introspect! {
    Scale as "fixtures::Scale" {
        reading,
        unit,
    }
}

pub fn scale(reading: f64) -> Scale {
    Scale {
        reading,
        unit: "kg".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Animal {
    pub legs: u32,
    pub wild: bool,
}

impl Animal {
    pub const KINGDOM: &'static str = "animalia";
}

introspect! {
    Animal as "fixtures::Animal" {
        legs,
        pub wild,
        pub const KINGDOM,
    }
}

#[derive(Debug, Clone)]
pub struct Cat {
    pub animal: Animal,
    pub name: String,
    pub owner: Option<Rc<Human>>,
}

impl Cat {
    pub const LIVES: u8 = 9;
}

introspect! {
    Cat as "fixtures::Cat" extends animal: Animal {
        name,
        owner,
        const LIVES,
    }
}

pub fn cat(name: &str, wild: bool) -> Cat {
    Cat {
        animal: Animal { legs: 4, wild },
        name: name.to_string(),
        owner: None,
    }
}
