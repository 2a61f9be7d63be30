use crate::cards::hand::Hand;
use crate::Score;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use byteorder::LE;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

/// The flattened automaton: one u32 slot per (state, card), with each state
/// occupying 52 consecutive slots starting at a multiple of 52. Inner slots
/// hold the successor's starting slot; last-layer slots hold the Score
/// itself. Evaluating a hand is one chained index per card from slot 0.
///
/// On disk this is exactly the in-memory array as little-endian u32s, no
/// header, so the file size is always 208 bytes per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table(Vec<u32>);

impl Table {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// the runtime contract: x <- table[x + card], once per card, no bounds
    /// checks beyond the slice's own. the hand must be sorted and match the
    /// size the table was built for; anything else is undefined.
    pub fn eval(&self, hand: &Hand) -> Score {
        let mut cursor = 0u32;
        for card in *hand {
            cursor = self.0[cursor as usize + u8::from(card) as usize];
        }
        cursor
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        for &slot in self.0.iter() {
            writer.write_u32::<LE>(slot)?;
        }
        writer.flush()
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let slots = file.metadata()?.len() as usize / std::mem::size_of::<u32>();
        let mut table = vec![0u32; slots];
        BufReader::new(file).read_u32_into::<LE>(&mut table)?;
        Ok(Self(table))
    }
}

/// Vec<u32> isomorphism
impl From<Vec<u32>> for Table {
    fn from(slots: Vec<u32>) -> Self {
        Self(slots)
    }
}
impl From<Table> for Vec<u32> {
    fn from(table: Table) -> Self {
        table.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_layer_walk() {
        let slots = (0..52u32).map(|card| card + 1).collect::<Vec<_>>();
        let table = Table::from(slots);
        let ref hand = Hand::try_from("2d").unwrap();
        assert_eq!(table.eval(hand), 2);
    }

    #[test]
    fn bijective_disk() {
        let ref path = std::env::temp_dir().join("phegen_roundtrip.phe");
        let table = Table::from(vec![7u32, 0, 42, u32::MAX]);
        table.save(path).unwrap();
        let loaded = Table::load(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(table, loaded);
    }

    #[test]
    fn files_are_little_endian() {
        let ref path = std::env::temp_dir().join("phegen_endian.phe");
        Table::from(vec![0x0A0B0C0Du32]).save(path).unwrap();
        let bytes = std::fs::read(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(bytes, vec![0x0D, 0x0C, 0x0B, 0x0A]);
    }
}
