use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The 27 federative-unit codes the State field accepts. An absent state is
/// modelled as `None`, never as an empty variant.
///
/// Parsing is exact: `"SP".parse::<StateCode>()` succeeds, `"sp"` does not,
/// which matches the store only ever persisting the uppercase code.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum StateCode {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}
