// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::operation::{ExpireOp, LeaveOp, ParkOp};
use chrono::{TimeZone, Utc};
use lot_core::{LengthOfStay, Plate, SpotCode};
use proptest::prelude::*;

fn park_op() -> Operation {
    let arrival = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let length_of_stay = LengthOfStay::parse("1.30").unwrap();
    Operation::Park(ParkOp {
        spot: SpotCode::parse("A01").unwrap(),
        plate: Plate::parse("A-123-BC").unwrap(),
        arrival,
        length_of_stay,
        departure: arrival + length_of_stay.as_duration(),
    })
}

fn leave_op() -> Operation {
    Operation::Leave(LeaveOp {
        spot: SpotCode::parse("A01").unwrap(),
        plate: Plate::parse("A-123-BC").unwrap(),
        departed_at: Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap(),
    })
}

#[test]
fn wal_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");

    {
        let mut wal = Wal::open(&path, "writer-a").unwrap();
        wal.append(park_op()).unwrap();
        wal.append(leave_op()).unwrap();
    }

    let mut wal = Wal::open(&path, "writer-b").unwrap();
    let read = wal.read_new().unwrap();
    assert!(read.corruption.is_none());
    assert_eq!(read.entries.len(), 2);
    assert_eq!(read.entries[0].operation, park_op());
    assert_eq!(read.entries[0].writer_id, "writer-a");
    assert!(matches!(read.entries[1].operation, Operation::Leave(_)));
}

#[test]
fn wal_sequence_continues_after_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");

    {
        let mut wal = Wal::open(&path, "w").unwrap();
        assert_eq!(wal.next_sequence(), 0);
        assert_eq!(wal.append(park_op()).unwrap().sequence, 0);
        assert_eq!(wal.next_sequence(), 1);
    }

    let mut wal = Wal::open(&path, "w").unwrap();
    wal.read_new().unwrap();
    assert_eq!(wal.next_sequence(), 1);
    assert_eq!(wal.append(leave_op()).unwrap().sequence, 1);
}

#[test]
fn read_new_only_returns_unseen_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");

    let mut ours = Wal::open(&path, "ours").unwrap();
    let mut theirs = Wal::open(&path, "theirs").unwrap();

    ours.append(park_op()).unwrap();
    assert!(ours.read_new().unwrap().entries.is_empty());

    let seen = theirs.read_new().unwrap();
    assert_eq!(seen.entries.len(), 1);
    theirs.append(leave_op()).unwrap();

    let seen = ours.read_new().unwrap();
    assert_eq!(seen.entries.len(), 1);
    assert_eq!(seen.entries[0].writer_id, "theirs");
    assert_eq!(ours.next_sequence(), 2);
}

#[test]
fn torn_tail_is_reported_and_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");

    let mut wal = Wal::open(&path, "w").unwrap();
    wal.append(park_op()).unwrap();
    {
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"sequence\":1,\"timest").unwrap();
    }

    let mut reader = Wal::open(&path, "r").unwrap();
    let read = reader.read_new().unwrap();
    assert_eq!(read.entries.len(), 1);
    let corruption = read.corruption.unwrap();
    assert_eq!(corruption.reason, "truncated entry");

    assert_eq!(reader.truncate_to_valid().unwrap(), 21);
    assert_eq!(reader.truncate_to_valid().unwrap(), 0);

    reader.append(leave_op()).unwrap();
    let mut fresh = Wal::open(&path, "f").unwrap();
    let read = fresh.read_new().unwrap();
    assert!(read.corruption.is_none());
    assert_eq!(read.entries.len(), 2);
}

#[test]
fn non_utf8_tail_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");

    let mut wal = Wal::open(&path, "w").unwrap();
    wal.append(park_op()).unwrap();
    {
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{\"sequence\":1,\xff\n").unwrap();
    }

    let mut reader = Wal::open(&path, "r").unwrap();
    let read = reader.read_new().unwrap();
    assert_eq!(read.entries.len(), 1);
    assert!(read.corruption.unwrap().reason.starts_with("invalid UTF-8"));

    assert_eq!(reader.truncate_to_valid().unwrap(), 16);
    reader.append(leave_op()).unwrap();
    let read = Wal::open(&path, "f").unwrap().read_new().unwrap();
    assert!(read.corruption.is_none());
    assert_eq!(read.entries.len(), 2);
}

#[test]
fn checksum_mismatch_stops_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");

    let mut entry = WalEntry::new(0, "w", park_op());
    entry.checksum ^= 1;
    let good = WalEntry::new(1, "w", leave_op());
    std::fs::write(
        &path,
        format!("{}\n{}\n", entry.to_line().unwrap(), good.to_line().unwrap()),
    )
    .unwrap();

    let mut wal = Wal::open(&path, "r").unwrap();
    let read = wal.read_new().unwrap();
    assert!(read.entries.is_empty());
    assert_eq!(read.corruption.map(|c| c.offset), Some(0));
}

#[test]
fn blank_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.wal");
    let entry = WalEntry::new(0, "w", Operation::Expire(ExpireOp {
        spots: vec![SpotCode::parse("A01").unwrap()],
        at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }));
    std::fs::write(&path, format!("\n{}\n\n", entry.to_line().unwrap())).unwrap();

    let mut wal = Wal::open(&path, "r").unwrap();
    let read = wal.read_new().unwrap();
    assert!(read.corruption.is_none());
    assert_eq!(read.entries, vec![entry]);
}

#[test]
fn entry_checksum_verifies() {
    let entry = WalEntry::new(7, "w", park_op());
    assert!(entry.verify());
    let parsed = WalEntry::from_line(&entry.to_line().unwrap()).unwrap();
    assert_eq!(parsed, entry);
}

/// Write park, leave, park and return the file bytes
fn three_entry_log(path: &Path) -> Vec<u8> {
    let mut wal = Wal::open(path, "writer-a").unwrap();
    wal.append(park_op()).unwrap();
    wal.append(leave_op()).unwrap();
    wal.append(park_op()).unwrap();
    std::fs::read(path).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn cut_log_reads_back_whole_entries_only(cut_ratio in 0.0f64..=1.0) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lot.wal");
        let bytes = three_entry_log(&path);
        let cut = ((bytes.len() as f64) * cut_ratio) as usize;
        std::fs::write(&path, &bytes[..cut]).unwrap();

        let line_ends: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .map(|(i, _)| i + 1)
            .collect();
        let complete = line_ends.iter().filter(|end| **end <= cut).count();
        let on_boundary = cut == 0 || line_ends.contains(&cut);

        let mut wal = Wal::open(&path, "reader").unwrap();
        let read = wal.read_new().unwrap();
        prop_assert_eq!(read.entries.len(), complete);
        prop_assert_eq!(read.corruption.is_none(), on_boundary);
        prop_assert_eq!(wal.next_sequence(), complete as u64);
    }
}
