mod common;

use common::{default_engine, init_logger, rng};
use toy_lwe_fhe::{LweEngine, SecretKey};

#[test]
fn mod_switch_to_same_modulus_is_a_no_op() {
    let engine = default_engine();
    let mut rng = rng(200);
    let pair = engine.generate_key_pair(&mut rng);
    let big_q = engine.params().big_q();
    let ct = engine
        .encrypt_public(&pair.public_key, 1, 4, big_q, &mut rng)
        .unwrap();

    let once = engine.mod_switch(big_q, &ct);
    assert_eq!(once, ct);
    assert_eq!(engine.mod_switch(big_q, &once), once);
}

#[test]
fn mod_switch_down_keeps_the_message() {
    let engine = default_engine();
    let mut rng = rng(201);
    let pair = engine.generate_key_pair(&mut rng);
    let big_q = engine.params().big_q();
    let q_ks = engine.params().q_ks();
    for m in 0..4 {
        let ct = engine
            .encrypt_public(&pair.public_key, m, 4, big_q, &mut rng)
            .unwrap();
        let switched = engine.mod_switch(q_ks, &ct);
        assert_eq!(switched.modulus(), &q_ks);
        assert_eq!(engine.decrypt(&pair.secret_key, &switched, 4).unwrap(), m);
    }
}

#[test]
fn key_switch_recovers_message_after_mod_switch() {
    init_logger();
    let engine = default_engine();
    let mut rng = rng(202);
    let sk = engine.generate_secret_key(&mut rng);
    let pair = engine.generate_key_pair(&mut rng);
    let ksk = engine
        .key_switch_gen(&sk, &pair.secret_key, &mut rng)
        .unwrap();

    let big_q = engine.params().big_q();
    let q_ks = engine.params().q_ks();
    for m in 0..4 {
        let ct = engine
            .encrypt_public(&pair.public_key, m, 4, big_q, &mut rng)
            .unwrap();
        let switched = engine
            .key_switch(&ksk, &engine.mod_switch(q_ks, &ct))
            .unwrap();
        assert_eq!(switched.dimension(), engine.params().n());
        assert_eq!(engine.decrypt(&sk, &switched, 4).unwrap(), m);
    }
}

#[test]
fn ring_secret_encryption_switches_down_to_small_key() {
    init_logger();
    let engine = default_engine();
    let mut rng = rng(208);
    let sk = engine.generate_secret_key(&mut rng);
    let sk_n = engine.generate_ring_secret_key(&mut rng);
    let ksk = engine.key_switch_gen(&sk, &sk_n, &mut rng).unwrap();

    let q_ks = engine.params().q_ks();
    for m in 0..4 {
        let ct = engine.encrypt(&sk_n, m, 4, q_ks, &mut rng).unwrap();
        assert_eq!(ct.dimension(), engine.params().ring_dim());
        assert_eq!(engine.decrypt(&sk_n, &ct, 4).unwrap(), m);

        let switched = engine.key_switch(&ksk, &ct).unwrap();
        assert_eq!(switched.dimension(), engine.params().n());
        assert_eq!(engine.decrypt(&sk, &switched, 4).unwrap(), m);

        let small = engine.mod_switch(engine.params().q(), &switched);
        assert_eq!(engine.decrypt(&sk, &small, 4).unwrap(), m);
    }
}

#[test]
fn switch_pipeline_lands_on_small_parameters() {
    init_logger();
    let engine = default_engine();
    let mut rng = rng(203);
    let sk = engine.generate_secret_key(&mut rng);
    let pair = engine.generate_key_pair(&mut rng);
    let ksk = engine
        .key_switch_gen(&sk, &pair.secret_key, &mut rng)
        .unwrap();

    let big_q = engine.params().big_q();
    for m in 0..4 {
        let ct = engine
            .encrypt_public(&pair.public_key, m, 4, big_q, &mut rng)
            .unwrap();
        let small = engine.switch_ct_to_qn(&ksk, &ct).unwrap();
        assert_eq!(small.dimension(), 16);
        assert_eq!(small.modulus(), &engine.params().q());
        assert_eq!(small.plaintext_modulus(), 4);

        let (decrypted, noise) = engine.decrypt_with_noise(&sk, &small, 4).unwrap();
        assert_eq!(decrypted, m);
        assert!(noise.abs() < 128, "noise {noise} above decryption bound");
    }
}

#[test]
fn generation_is_reproducible_across_thread_schedules() {
    let engine = default_engine();
    let mut key_rng = rng(204);
    let sk = engine.generate_secret_key(&mut key_rng);
    let sk_n = engine.generate_ring_secret_key(&mut key_rng);

    let ksk1 = engine.key_switch_gen(&sk, &sk_n, &mut rng(205)).unwrap();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let ksk2 = pool
        .install(|| engine.key_switch_gen(&sk, &sk_n, &mut rng(205)))
        .unwrap();
    assert_eq!(ksk1, ksk2);
}

#[test]
fn multiparty_switching_key_switches_joint_ciphertexts() {
    init_logger();
    let engine = default_engine();
    let mut rng = rng(206);
    let parties: Vec<(SecretKey, SecretKey)> = (0..3)
        .map(|_| {
            (
                engine.generate_secret_key(&mut rng),
                engine.generate_ring_secret_key(&mut rng),
            )
        })
        .collect();

    let (sk_0, sk_n_0) = &parties[0];
    let mut ksk = engine.key_switch_gen(sk_0, sk_n_0, &mut rng).unwrap();
    for (sk_i, sk_n_i) in &parties[1..] {
        let next = engine
            .multiparty_key_switch_gen(sk_i, sk_n_i, &ksk, &mut rng)
            .unwrap();
        assert!(next.shares_masks_with(&ksk));
        ksk = next;
    }

    let small: Vec<SecretKey> = parties.iter().map(|(s, _)| s.clone()).collect();
    let ring: Vec<SecretKey> = parties.iter().map(|(_, s)| s.clone()).collect();
    let joint_sk = SecretKey::aggregate(&small).unwrap();
    let joint = engine.multiparty_key_gen(&ring, &mut rng).unwrap();

    let big_q = engine.params().big_q();
    for m in 0..4 {
        let ct = engine
            .encrypt_public(&joint.public_key, m, 4, big_q, &mut rng)
            .unwrap();
        let small_ct = engine.switch_ct_to_qn(&ksk, &ct).unwrap();
        assert_eq!(engine.decrypt(&joint_sk, &small_ct, 4).unwrap(), m);
    }
}

#[test]
fn keys_for_other_dimensions_are_rejected() {
    let engine = default_engine();
    let mut rng = rng(207);
    let sk = engine.generate_secret_key(&mut rng);
    let sk_n = engine.generate_ring_secret_key(&mut rng);
    assert!(engine.key_switch_gen(&sk_n, &sk, &mut rng).is_err());

    let ksk = engine.key_switch_gen(&sk, &sk_n, &mut rng).unwrap();
    let smaller = LweEngine::builder().ring_dim(32).build().unwrap();
    let pair = smaller.generate_key_pair(&mut rng);
    let ct = smaller
        .encrypt_public(&pair.public_key, 1, 4, smaller.params().big_q(), &mut rng)
        .unwrap();
    assert!(smaller.switch_ct_to_qn(&ksk, &ct).is_err());
}
