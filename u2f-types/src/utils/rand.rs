//! Random number generator utilities for challenges, session ids and device secrets

use rand::RngCore;

fn random_fill(buffer: &mut [u8]) {
    let mut random = rand::thread_rng();
    random.fill_bytes(buffer);
}

/// Generate random data of specific length.
pub fn random_vec(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    random_fill(&mut data);
    data
}

/// Generate a random fixed size array.
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut data = [0u8; N];
    random_fill(&mut data);
    data
}
