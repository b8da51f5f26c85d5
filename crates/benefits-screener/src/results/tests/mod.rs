mod common;

mod citizenship;
mod visibility;
