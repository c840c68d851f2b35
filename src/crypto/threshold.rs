//! Threshold decryption over additively shared secrets.
//!
//! With `s = s_lead + s_1 + ... + s_k`, the lead party publishes
//! `b - <a, s_lead>` and every other party publishes `<a, s_i>`. Fusion
//! subtracts the non-lead shares from the lead share and rounds as in
//! single-party decryption.
use super::encryption::{check_decryptable, round_to_plaintext};
use super::{LweEngine, LweError, LweResult};
use crate::ciphertext::{Ciphertext, LwePlaintext};
use crate::keys::SecretKey;

impl LweEngine {
    /// Lead share `(a, b - <a, s_lead>)`.
    ///
    /// `a` is carried along unchanged so all shares stay aligned.
    pub fn multiparty_decrypt_lead(
        &self,
        sk_lead: &SecretKey,
        ct: &Ciphertext,
        p: u64,
    ) -> LweResult<Ciphertext> {
        check_decryptable(ct.modulus(), p)?;
        sk_lead.check_dimension(ct.dimension())?;
        let r = ct.phase(&sk_lead.switched(*ct.modulus()));
        Ok(Ciphertext::new(ct.a().clone(), r, p))
    }

    /// Non-lead share `(a, <a, s_i>)`.
    pub fn multiparty_decrypt_main(
        &self,
        sk_i: &SecretKey,
        ct: &Ciphertext,
        p: u64,
    ) -> LweResult<Ciphertext> {
        check_decryptable(ct.modulus(), p)?;
        sk_i.check_dimension(ct.dimension())?;
        let inner = ct.a().dot(&sk_i.switched(*ct.modulus()));
        Ok(Ciphertext::new(ct.a().clone(), inner, p))
    }

    /// Combines partial decryptions into the plaintext.
    ///
    /// The first share must be the lead share.
    pub fn multiparty_decrypt_fusion(
        &self,
        shares: &[Ciphertext],
        p: u64,
    ) -> LweResult<LwePlaintext> {
        let (lead, rest) = shares.split_first().ok_or(LweError::EmptyShares)?;
        let q = *lead.modulus();
        check_decryptable(&q, p)?;

        let mut r = lead.b();
        for share in rest {
            if share.modulus() != &q {
                return Err(LweError::ModulusMismatch {
                    expected: q.value(),
                    actual: share.modulus().value(),
                });
            }
            r = q.sub(r, share.b());
        }
        Ok(round_to_plaintext(r, p, &q))
    }
}
