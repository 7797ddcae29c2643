use criterion::{black_box, criterion_group, Criterion};
use solar_system::entities::celestials::registry::SolarSystem;
use solar_system::physics::orbits::circular::orbital_position;
use solar_system::physics::orbits::components::{AngularSpeed, Length};

fn bench_orbital_position(c: &mut Criterion) {
    c.bench_function("orbital_position", |b| {
        b.iter(|| {
            orbital_position(
                black_box(12.5),
                black_box(Length(20.0)),
                black_box(AngularSpeed(0.005)),
            )
        })
    });
}

fn bench_whole_system(c: &mut Criterion) {
    let system = SolarSystem::default();
    c.bench_function("solar_system_poses_at", |b| {
        b.iter(|| system.poses_at(black_box(1234.5)))
    });
}

criterion_group!(benches, bench_orbital_position, bench_whole_system);
