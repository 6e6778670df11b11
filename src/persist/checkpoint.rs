use crate::game::BettingAction;
use crate::mccfr::Profile;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};

const MAGIC: &[u8; 4] = b"HTC1";

/// writes `profile` to `path` atomically: the full image is written to a
/// sibling temp file first, then renamed into place, so a crash mid-write
/// never leaves a half-written checkpoint for the next `load_checkpoint` to
/// choke on.
pub fn save_checkpoint(path: &str, profile: &Profile) -> anyhow::Result<()> {
    let tmp_path = format!("{path}.tmp");
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        write_profile(&mut file, profile)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)?;
    log::info!("checkpoint written to {path} ({} infosets)", profile.infoset_count());
    Ok(())
}

/// loads a checkpoint previously written by `save_checkpoint` or
/// `save_policy_export`. Returns `Ok(None)` if no file exists at `path` yet,
/// so callers can fall back to a fresh `Profile` on a first run. A profile
/// loaded from a policy export has an empty `regret_sum` -- resuming
/// training from one would restart regret accumulation from scratch, which
/// is why `Trainer` should always be resumed from a full checkpoint instead.
pub fn load_checkpoint(path: &str) -> anyhow::Result<Option<Profile>> {
    if std::fs::metadata(path).is_err() {
        return Ok(None);
    }
    let mut file = std::fs::File::open(path)?;
    Ok(Some(read_profile(&mut file)?))
}

/// writes only `iteration` and `strategy_sum`, omitting `regret_sum`
/// entirely, for distributing a smaller play-only file to the runtime
/// `Policy` once training is done. Still written atomically via a temp file
/// plus rename.
pub fn save_policy_export(path: &str, profile: &Profile) -> anyhow::Result<()> {
    let tmp_path = format!("{path}.tmp");
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(MAGIC)?;
        file.write_u8(0)?;
        file.write_u64::<LittleEndian>(profile.iterations())?;
        write_table(&mut file, profile.strategy_sum())?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)?;
    log::info!("policy export written to {path} ({} infosets, no regrets)", profile.infoset_count());
    Ok(())
}

fn write_profile<W: Write>(w: &mut W, profile: &Profile) -> io::Result<()> {
    w.write_all(MAGIC)?;
    w.write_u8(1)?;
    w.write_u64::<LittleEndian>(profile.iterations())?;
    write_table(w, profile.strategy_sum())?;
    write_table(w, profile.regret_sum())?;
    Ok(())
}

fn read_profile<R: Read>(r: &mut R) -> anyhow::Result<Profile> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    anyhow::ensure!(&magic == MAGIC, "checkpoint has unrecognized magic bytes");
    let has_regrets = r.read_u8()? != 0;
    let iterations = r.read_u64::<LittleEndian>()?;
    let strategy_sum = read_table(r)?;
    let regret_sum = if has_regrets { read_table(r)? } else { BTreeMap::new() };
    Ok(Profile::from_parts(iterations, regret_sum, strategy_sum))
}

fn write_table<W: Write>(w: &mut W, table: &BTreeMap<String, BTreeMap<BettingAction, f32>>) -> io::Result<()> {
    w.write_u32::<LittleEndian>(table.len() as u32)?;
    for (key, row) in table {
        let key_bytes = key.as_bytes();
        w.write_u32::<LittleEndian>(key_bytes.len() as u32)?;
        w.write_all(key_bytes)?;
        w.write_u32::<LittleEndian>(row.len() as u32)?;
        for (action, value) in row {
            w.write_u8(action_tag(*action))?;
            w.write_f32::<LittleEndian>(*value)?;
        }
    }
    Ok(())
}

fn read_table<R: Read>(r: &mut R) -> anyhow::Result<BTreeMap<String, BTreeMap<BettingAction, f32>>> {
    let entries = r.read_u32::<LittleEndian>()?;
    let mut table = BTreeMap::new();
    for _ in 0..entries {
        let key_len = r.read_u32::<LittleEndian>()? as usize;
        let mut key_bytes = vec![0u8; key_len];
        r.read_exact(&mut key_bytes)?;
        let key = String::from_utf8(key_bytes)?;
        let row_len = r.read_u32::<LittleEndian>()?;
        let mut row = BTreeMap::new();
        for _ in 0..row_len {
            let tag = r.read_u8()?;
            let value = r.read_f32::<LittleEndian>()?;
            row.insert(action_from_tag(tag)?, value);
        }
        table.insert(key, row);
    }
    Ok(table)
}

fn action_tag(action: BettingAction) -> u8 {
    match action {
        BettingAction::Fold => 0,
        BettingAction::CheckCall => 1,
        BettingAction::Bet33 => 2,
        BettingAction::Bet66 => 3,
        BettingAction::BetPot => 4,
        BettingAction::AllIn => 5,
        BettingAction::Discard0 => 6,
        BettingAction::Discard1 => 7,
        BettingAction::Discard2 => 8,
    }
}

fn action_from_tag(tag: u8) -> anyhow::Result<BettingAction> {
    Ok(match tag {
        0 => BettingAction::Fold,
        1 => BettingAction::CheckCall,
        2 => BettingAction::Bet33,
        3 => BettingAction::Bet66,
        4 => BettingAction::BetPot,
        5 => BettingAction::AllIn,
        6 => BettingAction::Discard0,
        7 => BettingAction::Discard1,
        8 => BettingAction::Discard2,
        other => anyhow::bail!("unrecognized action tag {other} in checkpoint"),
    })
}
