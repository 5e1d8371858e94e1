//! Pattern synthesis for Wordwarden.
//!
//! This module turns canonical banned terms into the set of compiled regular
//! expressions used to catch them, including deliberately evasive spellings:
//! letter substitution ("sh0e"), interior wildcarding ("s*oe"), spacing-out
//! ("s h o e"), and character stretching ("shooooe"). Compiled patterns are
//! cached per term with a time bound so repeated scans stay cheap.
//!
//! This module works closely with `scanner` (which applies the patterns) and
//! `validators` (which rejects the over-aggressive matches the evasion
//! patterns deliberately admit).

pub mod compiler;
