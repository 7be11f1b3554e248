//! Contracts for the external assembler/encoder collaborators, plus a
//! minimal stand-in so the pipeline runs end to end.
//!
//! The real rs2asm assembler lives outside this crate; the packer only
//! needs "symbol table + source bytes in, script definition out" and
//! "script definition in, payload bytes out".

use anyhow::{Result, anyhow, bail};

use crate::model::{ScriptDefinition, SymbolTable};

/// Translates one source byte stream into a script definition, resolving
/// symbolic component names through the table.
pub trait ScriptAssembler {
    fn assemble(&self, source: &[u8], symbols: &SymbolTable) -> Result<ScriptDefinition>;
}

/// Serializes a script definition into the archive payload.
pub trait ScriptEncoder {
    fn encode(&self, script: &ScriptDefinition) -> Vec<u8>;
}

/// Stand-in assembler: reads the `.id` header directive, checks that every
/// `interface:component` reference exists in the symbol table, and carries
/// the source bytes through as the body. No real encoding happens here.
pub struct PlainAssembler;

impl ScriptAssembler for PlainAssembler {
    fn assemble(&self, source: &[u8], symbols: &SymbolTable) -> Result<ScriptDefinition> {
        let text = std::str::from_utf8(source).map_err(|e| anyhow!("source is not UTF-8: {e}"))?;

        let mut id = None;
        for line in text.lines() {
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some(".id"), Some(value)) => {
                    id = Some(
                        value
                            .parse::<u32>()
                            .map_err(|e| anyhow!("bad .id value `{value}`: {e}"))?,
                    );
                    break;
                }
                _ => continue,
            }
        }
        let id = id.ok_or_else(|| anyhow!("script has no .id directive"))?;

        for word in text.split_whitespace() {
            if looks_like_component_ref(word) && symbols.lookup(word).is_none() {
                bail!("unknown component `{word}`");
            }
        }

        Ok(ScriptDefinition {
            id,
            body: source.to_vec(),
        })
    }
}

fn looks_like_component_ref(word: &str) -> bool {
    match word.split_once(':') {
        Some((iface, comp)) => {
            !iface.is_empty()
                && !comp.is_empty()
                && iface.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
                && comp.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        None => false,
    }
}

/// Stand-in payload codec: 4-byte big-endian id followed by the body.
pub struct PlainCodec;

impl ScriptEncoder for PlainCodec {
    fn encode(&self, script: &ScriptDefinition) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + script.body.len());
        out.extend_from_slice(&script.id.to_be_bytes());
        out.extend_from_slice(&script.body);
        out
    }
}

impl PlainCodec {
    /// Inverse of `encode`, used to verify payloads round-trip.
    pub fn decode(&self, payload: &[u8]) -> Result<ScriptDefinition> {
        if payload.len() < 4 {
            bail!("payload too short: {} bytes", payload.len());
        }
        let (head, body) = payload.split_at(4);
        let id = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
        Ok(ScriptDefinition {
            id,
            body: body.to_vec(),
        })
    }
}
