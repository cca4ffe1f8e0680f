//! Exact order-statistic selection for the median filters.

/// Return the value that would sit at zero-based position `k` if `data`
/// were sorted ascending.
///
/// Partition-based selection: each round moves a median-of-three pivot
/// into place and continues only in the side that holds rank `k`, stopping
/// once the active range has two elements or fewer. The rest of the slice
/// is left partially ordered, so callers pass a private copy of each window.
/// Duplicate values are fine.
///
/// # Panics
///
/// Panics if `data` is empty or `k >= data.len()`.
pub fn select_kth(data: &mut [f32], k: usize) -> f32 {
    assert!(k < data.len(), "rank {} out of range for {} values", k, data.len());

    let mut l = 0usize;
    let mut ir = data.len() - 1;
    loop {
        if ir <= l + 1 {
            if ir == l + 1 && data[ir] < data[l] {
                data.swap(l, ir);
            }
            return data[k];
        }

        let mid = (l + ir) >> 1;
        data.swap(mid, l + 1);
        if data[l] > data[ir] {
            data.swap(l, ir);
        }
        if data[l + 1] > data[ir] {
            data.swap(l + 1, ir);
        }
        if data[l] > data[l + 1] {
            data.swap(l, l + 1);
        }

        // data[l] <= pivot <= data[ir] act as sentinels for the scans
        let pivot = data[l + 1];
        let mut i = l + 1;
        let mut j = ir;
        loop {
            i += 1;
            while data[i] < pivot {
                i += 1;
            }
            j -= 1;
            while data[j] > pivot {
                j -= 1;
            }
            if j < i {
                break;
            }
            data.swap(i, j);
        }
        data[l + 1] = data[j];
        data[j] = pivot;

        if j >= k {
            ir = j - 1;
        }
        if j <= k {
            l = i;
        }
    }
}
