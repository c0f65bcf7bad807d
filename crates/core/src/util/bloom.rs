// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64_with_seed;

const SEED: u64 = 0x5354_5241_5455_4d00;

/// A bloom filter over byte keys for fast negative membership checks.
///
/// Hashing is seeded xxh3, so a filter persisted in a stats log answers the
/// same way after it is read back in another process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloomFilter {
	bits: Vec<u64>,
	size: usize,
	hash_count: usize,
}

impl BloomFilter {
	/// Create a new bloom filter for the expected number of items with
	/// approximately 1% false positive rate
	pub fn new(expected_items: usize) -> Self {
		BloomFilterBuilder::new(expected_items).build()
	}

	/// Create a bloom filter with custom parameters
	pub fn with_params(size_bits: usize, hash_count: usize) -> Self {
		let word_count = size_bits.max(1).div_ceil(64);
		Self {
			bits: vec![0; word_count],
			size: word_count * 64,
			hash_count: hash_count.max(1),
		}
	}

	pub fn add(&mut self, item: &[u8]) {
		let hash = xxh3_64_with_seed(item, SEED);
		for i in 0..self.hash_count {
			let bit_pos = self.get_bit_pos(hash, i);
			self.bits[bit_pos / 64] |= 1u64 << (bit_pos % 64);
		}
	}

	/// Returns false if the item is definitely not in the set
	pub fn might_contain(&self, item: &[u8]) -> bool {
		let hash = xxh3_64_with_seed(item, SEED);
		(0..self.hash_count).all(|i| {
			let bit_pos = self.get_bit_pos(hash, i);
			self.bits[bit_pos / 64] & (1u64 << (bit_pos % 64)) != 0
		})
	}

	pub fn is_empty(&self) -> bool {
		self.bits.iter().all(|&word| word == 0)
	}

	/// Proportion of bits set
	pub fn fill_ratio(&self) -> f64 {
		let set_bits = self.bits.iter().map(|&word| word.count_ones() as usize).sum::<usize>();
		set_bits as f64 / self.size as f64
	}

	#[inline]
	fn get_bit_pos(&self, hash: u64, i: usize) -> usize {
		// double hashing: h_i(x) = h1(x) + i * h2(x) mod m
		let h1 = hash as usize;
		let h2 = (hash >> 32) as usize | 1;
		h1.wrapping_add(i.wrapping_mul(h2)) % self.size
	}
}

/// Builder for creating bloom filters with specific false positive rates
pub struct BloomFilterBuilder {
	expected_items: usize,
	false_positive_rate: f64,
}

impl BloomFilterBuilder {
	pub fn new(expected_items: usize) -> Self {
		Self {
			expected_items: expected_items.max(1),
			false_positive_rate: 0.01,
		}
	}

	/// Set the desired false positive rate, clamped into (0, 1)
	pub fn false_positive_rate(mut self, rate: f64) -> Self {
		self.false_positive_rate = rate.clamp(f64::MIN_POSITIVE, 0.5);
		self
	}

	pub fn build(self) -> BloomFilter {
		// m = -n * ln(p) / (ln(2)^2)
		let ln2 = std::f64::consts::LN_2;
		let size_bits = (-(self.expected_items as f64) * self.false_positive_rate.ln() / (ln2 * ln2)) as usize;

		// k = m/n * ln(2)
		let hash_count = ((size_bits as f64 / self.expected_items as f64) * ln2).round() as usize;

		BloomFilter::with_params(size_bits, hash_count)
	}
}
