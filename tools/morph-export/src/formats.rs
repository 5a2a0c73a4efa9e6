//! MorphSet file writer/reader
//!
//! Serialization for the `.morphset` format declared in
//! `morph_common::formats`.

use anyhow::{bail, Context, Result};
use glam::Vec3;
use morph_common::{
    MorphSetHeader, MorphTarget, MorphTargetDelta, MorphTargetRecordHeader, MorphTargetSet,
    DELTA_RECORD_SIZE,
};
use std::io::Write;

/// Write a complete MorphSet file.
///
/// Only targets are persisted; resolved names without a target exist solely
/// for the in-memory commit step.
pub fn write_morph_set<W: Write>(w: &mut W, set: &MorphTargetSet) -> Result<()> {
    let header = MorphSetHeader::new(set.targets.len() as u32);
    w.write_all(&header.to_bytes())?;

    for target in &set.targets {
        let name_bytes = target.name.as_bytes();
        if name_bytes.len() > u16::MAX as usize {
            bail!("Morph target name too long: {} bytes", name_bytes.len());
        }
        if target.section_indices.len() > u16::MAX as usize {
            bail!(
                "Morph target '{}' has too many sections: {}",
                target.name,
                target.section_indices.len()
            );
        }

        let record = MorphTargetRecordHeader::new(
            name_bytes.len() as u16,
            target.section_indices.len() as u16,
            target.deltas.len() as u32,
        );
        w.write_all(&record.to_bytes())?;
        w.write_all(name_bytes)?;

        for &section_idx in &target.section_indices {
            w.write_all(&(section_idx as u16).to_le_bytes())?;
        }

        for delta in &target.deltas {
            w.write_all(&delta.source_idx.to_le_bytes())?;
            for f in delta.position_delta.to_array() {
                w.write_all(&f.to_le_bytes())?;
            }
            for f in delta.normal_delta.to_array() {
                w.write_all(&f.to_le_bytes())?;
            }
        }
    }

    Ok(())
}

/// Parse a complete MorphSet file.
pub fn read_morph_set(data: &[u8]) -> Result<MorphTargetSet> {
    let header = MorphSetHeader::from_bytes(data)
        .context("Failed to parse morph set header - file may be corrupted or wrong format")?;

    let mut offset = MorphSetHeader::SIZE;
    let mut targets = Vec::with_capacity(header.target_count as usize);

    for _ in 0..header.target_count {
        let record = data
            .get(offset..)
            .and_then(MorphTargetRecordHeader::from_bytes)
            .context("Morph set data too small for target record header")?;
        offset += MorphTargetRecordHeader::SIZE;

        let body = data
            .get(offset..offset + record.body_size())
            .context("Morph set data too small for target record body")?;
        offset += record.body_size();

        let (name_bytes, rest) = body.split_at(record.name_len as usize);
        let (section_bytes, delta_bytes) = rest.split_at(record.section_count as usize * 2);

        let name = std::str::from_utf8(name_bytes)
            .context("Morph target name is not valid UTF-8")?
            .to_string();
        let section_indices = section_bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]) as u32)
            .collect();
        let deltas = delta_bytes
            .chunks_exact(DELTA_RECORD_SIZE)
            .map(parse_delta)
            .collect();

        targets.push(MorphTarget {
            name,
            deltas,
            section_indices,
        });
    }

    let names = targets.iter().map(|t| t.name.clone()).collect();
    Ok(MorphTargetSet { targets, names })
}

fn parse_delta(record: &[u8]) -> MorphTargetDelta {
    let f = |o: usize| f32::from_le_bytes([record[o], record[o + 1], record[o + 2], record[o + 3]]);
    MorphTargetDelta {
        source_idx: u32::from_le_bytes([record[0], record[1], record[2], record[3]]),
        position_delta: Vec3::new(f(4), f(8), f(12)),
        normal_delta: Vec3::new(f(16), f(20), f(24)),
    }
}
