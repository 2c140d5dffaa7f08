#![allow(dead_code)]

use std::fs::File;
use std::io::Read;

pub fn read_file(path: &str) -> Vec<u8> {
    let mut file = File::open(path).unwrap();
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).unwrap();
    buf
}

pub fn read_lines(path: &str) -> Vec<String> {
    let text = String::from_utf8(read_file(path)).unwrap();
    smaplink::split_lines(&text)
}

pub fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|&s| s.to_owned()).collect()
}
