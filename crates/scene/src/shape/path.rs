use vellum_core::{PathData, Point, Rect};

/// Arbitrary path geometry supplied by the caller.
#[derive(Clone, Debug)]
pub struct PathShape {
    pub data: PathData,
}

/// Samples per curve when flattening for containment.
const FLATTEN_STEPS: usize = 16;

impl PathShape {
    pub fn new(data: PathData) -> Self {
        Self { data }
    }

    pub fn bounding_rect(&self) -> Rect {
        self.data.bounds()
    }

    /// Even-odd containment over the flattened subpaths. Open subpaths are
    /// treated as implicitly closed, matching how fills are rasterized.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for subpath in self.data.flatten(FLATTEN_STEPS) {
            let n = subpath.len();
            if n < 3 {
                continue;
            }
            let mut j = n - 1;
            for i in 0..n {
                let (a, b) = (subpath[i], subpath[j]);
                if (a.y > p.y) != (b.y > p.y)
                    && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
                {
                    inside = !inside;
                }
                j = i;
            }
        }
        inside
    }
}
