use super::descriptor::PairDescriptor;
use crate::core::frame::RigidFrame;
use crate::core::sites::{Body, MAX_REAL_ATOMS, MAX_SITES, Site, SiteRole};
use nalgebra::Vector3;

/// Pairwise decomposition of a pair-term gradient over the real atoms of both bodies.
///
/// Rows and columns follow [`PairDescriptor::real_sites`]: the atoms of body A, then the atoms
/// of body B. Entry `(i, j)` is the part of the gradient on atom `i` that comes from its
/// interaction with atom `j`, so summing row `i` reproduces the gradient the driver returns for
/// atom `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceMatrix {
    size: usize,
    sites: [Site; MAX_REAL_ATOMS],
    entries: [[Vector3<f64>; MAX_REAL_ATOMS]; MAX_REAL_ATOMS],
}

impl ForceMatrix {
    pub(crate) fn zeros(descriptor: &PairDescriptor) -> Self {
        let mut sites = [Site::anchor_of(Body::A); MAX_REAL_ATOMS];
        let mut size = 0;
        for (slot, site) in sites.iter_mut().zip(descriptor.real_sites()) {
            *slot = site;
            size += 1;
        }
        Self {
            size,
            sites,
            entries: [[Vector3::zeros(); MAX_REAL_ATOMS]; MAX_REAL_ATOMS],
        }
    }

    /// Number of real atoms (rows and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The real atoms labelling rows and columns, in order.
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites[..self.size]
    }

    /// # Panics
    ///
    /// Panics if `row` or `column` is not smaller than [`ForceMatrix::size`].
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Vector3<f64> {
        assert!(row < self.size && column < self.size, "force matrix index out of range");
        self.entries[row][column]
    }

    /// Entry for two named sites, or `None` if either is not a real atom of this pair.
    pub fn between(&self, row: Site, column: Site) -> Option<Vector3<f64>> {
        let i = self.position(row)?;
        let j = self.position(column)?;
        Some(self.entries[i][j])
    }

    pub fn row_sum(&self, row: usize) -> Vector3<f64> {
        self.entries[row][..self.size].iter().sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Vector3<f64>]> + '_ {
        self.entries[..self.size].iter().map(|row| &row[..self.size])
    }

    fn position(&self, site: Site) -> Option<usize> {
        self.sites().iter().position(|&s| s == site)
    }
}

/// Site-by-site accumulator covering every site slot, virtual ones included.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawForceMatrix {
    entries: [[Vector3<f64>; MAX_SITES]; MAX_SITES],
}

impl RawForceMatrix {
    pub fn zeros() -> Self {
        Self {
            entries: [[Vector3::zeros(); MAX_SITES]; MAX_SITES],
        }
    }

    #[inline]
    pub fn get(&self, row: Site, column: Site) -> Vector3<f64> {
        self.entries[row.index()][column.index()]
    }

    /// Records a variable's contribution: `+c` on the first site from the second and `-c` on
    /// the second from the first.
    #[inline]
    pub fn record(&mut self, first: Site, second: Site, contribution: Vector3<f64>) {
        self.entries[first.index()][second.index()] += contribution;
        self.entries[second.index()][first.index()] -= contribution;
    }

    /// Moves every virtual-site row and column onto the real atoms of its body.
    ///
    /// Columns go to the anchor of the virtual site's body. Rows go through the frame adjoint,
    /// column by column, so each row sum still equals the folded per-site gradient.
    pub fn fold_virtual_sites(&mut self, frames: &[Option<RigidFrame>; 2]) {
        for body in Body::BOTH {
            if frames[body as usize].is_none() {
                continue;
            }
            let anchor = Site::new(body, SiteRole::Anchor).index();
            for virtual_site in virtual_sites(body) {
                let column = virtual_site.index();
                for row in self.entries.iter_mut() {
                    row[anchor] += row[column];
                    row[column] = Vector3::zeros();
                }
            }
        }

        for body in Body::BOTH {
            let Some(frame) = &frames[body as usize] else {
                continue;
            };
            let [v1, v2] = virtual_sites(body).map(Site::index);
            let targets = [SiteRole::Anchor, SiteRole::Peripheral1, SiteRole::Peripheral2]
                .map(|role| Site::new(body, role).index());
            for column in 0..MAX_SITES {
                let shares = frame.distribute(&self.entries[v1][column], &self.entries[v2][column]);
                for (target, share) in targets.iter().zip(shares) {
                    self.entries[*target][column] += share;
                }
                self.entries[v1][column] = Vector3::zeros();
                self.entries[v2][column] = Vector3::zeros();
            }
        }
    }

    /// Extracts the real-atom block, scales it by the switch value, and adds the switch
    /// derivative between the controlling pair.
    pub fn into_switched(
        self,
        descriptor: &PairDescriptor,
        switch_value: f64,
        switch_gradient: Vector3<f64>,
    ) -> ForceMatrix {
        let mut matrix = ForceMatrix::zeros(descriptor);
        for (i, row) in descriptor.real_sites().enumerate() {
            for (j, column) in descriptor.real_sites().enumerate() {
                matrix.entries[i][j] = self.get(row, column) * switch_value;
            }
        }

        let (first, second) = descriptor.controlling();
        if let (Some(i), Some(j)) = (descriptor.real_index(first), descriptor.real_index(second)) {
            matrix.entries[i][j] += switch_gradient;
            matrix.entries[j][i] -= switch_gradient;
        }
        matrix
    }
}

fn virtual_sites(body: Body) -> [Site; 2] {
    [
        Site::new(body, SiteRole::Virtual1),
        Site::new(body, SiteRole::Virtual2),
    ]
}
