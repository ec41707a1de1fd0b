use rand::{rngs::StdRng, Rng};

use super::{Gene, Genome, Reproducer};

// swaps the tails of `a` and `b` from index `i` on
fn crossed(a: &[Gene], b: &[Gene], i: usize) -> (Vec<Gene>, Vec<Gene>) {
    let i = i.min(a.len()).min(b.len());
    let (mut x, mut y) = (a[..i].to_vec(), b[..i].to_vec());
    x.extend_from_slice(&b[i..]);
    y.extend_from_slice(&a[i..]);
    (x, y)
}

fn pairs(parents: &[Genome]) -> impl Iterator<Item = (&Genome, &Genome)> {
    parents.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
}

pub struct OnePointReproducer {
    crossover_point: f64,
}

impl OnePointReproducer {
    pub fn new(crossover_point: f64) -> Self {
        assert!((0. ..=1.).contains(&crossover_point));
        Self { crossover_point }
    }

    fn split_index(&self, len: usize) -> usize {
        (len.saturating_sub(1) as f64 * self.crossover_point).round() as usize
    }
}

impl Reproducer for OnePointReproducer {
    fn reproduce(&mut self, parents: &[Genome]) -> Vec<Genome> {
        pairs(parents)
            .flat_map(|(a, b)| {
                let index = self.split_index(a.len().min(b.len()));
                let (x, y) = crossed(a.genes(), b.genes(), index);
                [Genome::new(x), Genome::new(y)]
            })
            .collect()
    }
}

pub struct WeightedAverageReproducer {
    rng: StdRng,
}

impl WeightedAverageReproducer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    fn blend(&mut self, a: &[Gene], b: &[Gene]) -> (Vec<Gene>, Vec<Gene>) {
        let (mut x, mut y): (Vec<_>, Vec<_>) = a
            .iter()
            .zip(b)
            .map(|(&a, &b)| {
                let r: f64 = self.rng.gen();
                let (a, b) = (a as f64, b as f64);
                (
                    (r * a + (1. - r) * b).round() as Gene,
                    ((1. - r) * a + r * b).round() as Gene,
                )
            })
            .unzip();
        let common = x.len();
        x.extend_from_slice(&a[common..]);
        y.extend_from_slice(&b[common..]);
        (x, y)
    }
}

impl Reproducer for WeightedAverageReproducer {
    fn reproduce(&mut self, parents: &[Genome]) -> Vec<Genome> {
        let mut children = Vec::with_capacity(parents.len());
        for (a, b) in pairs(parents) {
            let (x, y) = self.blend(a.genes(), b.genes());
            children.push(Genome::new(x));
            children.push(Genome::new(y));
        }
        children
    }
}
