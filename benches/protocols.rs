use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feldman_dkg::{
    combine_signatures, compat::Bls12, generate_contribution, sign, verify,
    verify_contribution_share, KeygenOutput, KeygenSession, LabeledShare, MemberId, MemberList,
};
use rand_core::OsRng;

fn run_keygen(members: &[MemberId<Bls12>], threshold: usize) -> Vec<KeygenOutput<Bls12>> {
    let mut sessions: Vec<_> = members
        .iter()
        .map(|me| KeygenSession::new(members, *me, threshold).unwrap())
        .collect();
    let contributions: Vec<_> = sessions
        .iter_mut()
        .map(|s| s.contribute(&mut OsRng).unwrap())
        .collect();

    for (from, contribution) in members.iter().zip(contributions.iter()) {
        for (to, share) in contribution.shares() {
            let i = members.iter().position(|m| m == to).unwrap();
            sessions[i]
                .receive(
                    from,
                    contribution.verification_vector.clone(),
                    share.clone(),
                )
                .unwrap();
        }
    }

    sessions.iter().map(|s| s.finalize().unwrap()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let members: Vec<_> = (0..7).map(MemberId::<Bls12>::from_index).collect();
    let list = MemberList::new(&members).unwrap();
    let t = 4;

    c.bench_function("generate contribution (7,4)", |b| {
        b.iter(|| generate_contribution(&mut OsRng, black_box(&list), black_box(t)))
    });

    let contribution = generate_contribution(&mut OsRng, &list, t).unwrap();
    let share = contribution.share_for(&members[3]).unwrap();
    c.bench_function("verify share (7,4)", |b| {
        b.iter(|| {
            verify_contribution_share(
                black_box(&contribution.verification_vector),
                black_box(&members[3]),
                black_box(share),
            )
        })
    });

    c.bench_function("keygen (7,4)", |b| {
        b.iter(|| run_keygen(black_box(&members), black_box(t)))
    });

    let outputs = run_keygen(&members, t);
    let msg = b"hello world";
    let shares: Vec<_> = outputs[..t]
        .iter()
        .map(|out| LabeledShare::new(out.id, sign(&out.private_share, msg)))
        .collect();

    c.bench_function("combine signatures (7,4)", |b| {
        b.iter(|| combine_signatures(black_box(&shares), black_box(t)))
    });

    let signature = combine_signatures(&shares, t).unwrap();
    let public_key = outputs[0].public_key();
    c.bench_function("verify signature", |b| {
        b.iter(|| verify::<Bls12>(black_box(&public_key), black_box(msg), black_box(&signature)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
