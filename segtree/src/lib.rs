pub mod lazy;

pub use lazy::LazySegtree;
pub use query::{operation, Mode, Monoid, QueryError, Result};

use std::{
    cmp::Ordering,
    iter,
    ops::{Bound, Deref, DerefMut, RangeBounds},
};

/// 一点更新・区間取得のセグメント木
///
/// 葉の数を2冪に切り上げ、頂点`i`の子を`2i`, `2i + 1`とする配列で持つ。
/// 余った葉は単位元で埋める。
#[derive(Debug, Clone)]
pub struct Segtree<T, OP> {
    size: usize,
    half: usize,
    data: Box<[T]>,
    op: OP,
}

impl<T, OP> Segtree<T, OP> {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut data = self.data.into_vec();
        data.drain(..self.half);
        data.truncate(self.size);
        data
    }
}

impl<T, OP> Deref for Segtree<T, OP> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.data[self.half..self.half + self.size]
    }
}

/// 戻り値を`(l, r)`とすると以下が保証される。
///
/// * `l <= r <= len`
pub(crate) fn get_lr<R: RangeBounds<usize>>(len: usize, range: R) -> Result<(usize, usize)> {
    use Bound::*;
    let l = match range.start_bound() {
        Excluded(&s) => s.saturating_add(1),
        Included(&s) => s,
        Unbounded => 0,
    };
    let r = match range.end_bound() {
        Excluded(&e) => e,
        Included(&e) => e.saturating_add(1),
        Unbounded => len,
    };
    if l > r || r > len {
        Err(QueryError::InvalidRange { start: l, end: r, len })
    } else {
        Ok((l, r))
    }
}

impl<T, OP: Monoid<Element = T>> Segtree<T, OP> {
    fn eval(&mut self, i: usize) {
        self.data[i] = self.op.op(&self.data[i * 2], &self.data[i * 2 + 1]);
    }

    pub fn from_iter_op<I: IntoIterator<Item = T>>(iter: I, op: OP) -> Self {
        let leaves = iter.into_iter().collect::<Vec<_>>();
        let size = leaves.len();
        let half = if size == 0 { 0 } else { size.next_power_of_two() };
        let data = iter::repeat_with(|| op.identity())
            .take(half)
            .chain(
                leaves
                    .into_iter()
                    .chain(iter::repeat_with(|| op.identity()))
                    .take(half),
            )
            .collect();
        let mut segtree = Self {
            size,
            half,
            data,
            op,
        };
        for i in (1..half).rev() {
            segtree.eval(i);
        }
        tracing::debug!(size, half, "segment tree built");
        segtree
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(QueryError::IndexOutOfRange {
                index,
                len: self.size,
            })
        }
    }

    pub fn query<R: RangeBounds<usize>>(&self, range: R) -> Result<T> {
        let (mut l, mut r) = get_lr(self.size, range)?;
        l += self.half;
        r += self.half;
        let mut query_l = self.op.identity();
        let mut query_r = self.op.identity();
        while l < r {
            if r & 1 == 1 {
                r -= 1;
                query_r = self.op.op(&self.data[r], &query_r);
            }
            if l & 1 == 1 {
                self.op.op_assign(&mut query_l, &self.data[l]);
                l += 1;
            }
            l >>= 1;
            r >>= 1;
        }
        self.op.op_assign(&mut query_l, &query_r);
        Ok(query_l)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<ValMut<'_, T, OP>> {
        self.check_index(index)?;
        Ok(ValMut {
            index: index + self.half,
            segtree: self,
        })
    }

    fn update_val(&mut self, mut i: usize) {
        while i > 1 {
            i >>= 1;
            self.eval(i);
        }
    }

    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        let i = index + self.half;
        self.data[i] = value;
        self.update_val(i);
        Ok(())
    }

    /// `pred(self.query(l..j))`が`true`となる最大の`j`をO(log(n))で求める。
    ///
    /// `pred(&identity)`は`true`で、`pred`は単調である必要がある。
    pub fn upper_bound<P>(&self, l: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        match l.cmp(&self.size) {
            Ordering::Equal => return Ok(l),
            Ordering::Greater => {
                return Err(QueryError::IndexOutOfRange {
                    index: l,
                    len: self.size,
                })
            }
            _ => {}
        };
        let mut l = l + self.half;
        let mut l_query = self.op.identity();
        loop {
            while l & 1 == 0 {
                l >>= 1;
            }
            let next_query = self.op.op(&l_query, &self.data[l]);
            if !pred(&next_query) {
                while l < self.half {
                    l <<= 1;
                    let next_query = self.op.op(&l_query, &self.data[l]);
                    if pred(&next_query) {
                        l_query = next_query;
                        l += 1;
                    }
                }
                // 単位元で埋めた葉の分を除く
                return Ok((l - self.half).min(self.size));
            }
            l_query = next_query;
            l += 1;
            if l.is_power_of_two() {
                return Ok(self.size);
            }
        }
    }

    /// `pred(self.query(j..r))`が`true`となる最小の`j`をO(log(n))で求める。
    ///
    /// `pred(&identity)`は`true`で、`pred`は単調である必要がある。
    pub fn lower_bound<P>(&self, r: usize, mut pred: P) -> Result<usize>
    where
        P: FnMut(&T) -> bool,
    {
        if r > self.size {
            return Err(QueryError::IndexOutOfRange {
                index: r,
                len: self.size,
            });
        }
        if r == 0 {
            return Ok(0);
        }
        let mut r = r + self.half;
        let mut r_query = self.op.identity();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            let next_query = self.op.op(&self.data[r], &r_query);
            if !pred(&next_query) {
                while r < self.half {
                    r = (r << 1) + 1;
                    let next_query = self.op.op(&self.data[r], &r_query);
                    if pred(&next_query) {
                        r_query = next_query;
                        r -= 1;
                    }
                }
                return Ok(r + 1 - self.half);
            }
            r_query = next_query;
            if r.is_power_of_two() {
                return Ok(0);
            }
        }
    }
}

/// 書き換え後、dropされた時点で祖先を再計算する。
pub struct ValMut<'a, T, OP: Monoid<Element = T>> {
    segtree: &'a mut Segtree<T, OP>,
    index: usize,
}

impl<'a, T, OP: Monoid<Element = T>> Deref for ValMut<'a, T, OP> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.segtree.data[self.index]
    }
}

impl<'a, T, OP: Monoid<Element = T>> DerefMut for ValMut<'a, T, OP> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.segtree.data[self.index]
    }
}

impl<'a, T, OP: Monoid<Element = T>> Drop for ValMut<'a, T, OP> {
    fn drop(&mut self) {
        self.segtree.update_val(self.index);
    }
}

impl<I, OP> FromIterator<I> for Segtree<I, OP>
where
    OP: Default + Monoid<Element = I>,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from_iter_op(iter, OP::default())
    }
}

impl<T, OP> From<Segtree<T, OP>> for Vec<T> {
    fn from(value: Segtree<T, OP>) -> Self {
        value.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_test() {
        let segtree = Segtree::from_iter_op([1u32, 2, 3, 4, 5, 6], operation::min());
        assert_eq!(
            &segtree.data[1..],
            &[
                1,
                1,
                5,
                1,
                3,
                5,
                u32::MAX,
                1,
                2,
                3,
                4,
                5,
                6,
                u32::MAX,
                u32::MAX
            ]
        );
        assert_eq!(&segtree[..], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(segtree.len(), 6);
    }

    #[test]
    fn sum_query_test() {
        let segtree = [-4, 6, -3, 2, 1, 1, 7]
            .into_iter()
            .collect::<Segtree<_, operation::Sum<_>>>();

        assert_eq!(segtree.query(..), Ok(10));
        assert_eq!(segtree.query(3..), Ok(11));
        assert_eq!(segtree.query(3..6), Ok(4));
        assert_eq!(segtree.query(..3), Ok(-1));

        assert_eq!(segtree.query(0..1), Ok(-4));
        assert_eq!(segtree.query(0..=0), Ok(-4));
        assert_eq!(segtree.query(0..=1), Ok(2));
        assert_eq!(segtree.query(0..0), Ok(0));
        assert_eq!(segtree.query(1..1), Ok(0));
        assert_eq!(segtree.query(7..7), Ok(0));
        assert_eq!(segtree.query(6..7), Ok(7));
    }

    #[test]
    fn min_query_test() {
        let segtree = Segtree::from_iter_op([23i64, 12, -3, 0, 3, -2, 7, 8], Mode::Min);

        assert_eq!(segtree.query(..), Ok(-3));
        assert_eq!(segtree.query(3..), Ok(-2));
        assert_eq!(segtree.query(..2), Ok(12));
        assert_eq!(segtree.query(3..5), Ok(0));

        assert_eq!(segtree.query(0..1), Ok(23));
        assert_eq!(segtree.query(0..=1), Ok(12));
        assert_eq!(segtree.query(0..0), Ok(i64::MAX));
        assert_eq!(segtree.query(7..8), Ok(8));
    }

    #[test]
    fn out_of_bounds_test() {
        let segtree = Segtree::from_iter_op([1i64, 2, 3, 4, 5, 6, 7], Mode::Sum);
        assert_eq!(
            segtree.query(0..9),
            Err(QueryError::InvalidRange {
                start: 0,
                end: 9,
                len: 7
            })
        );
        assert!(segtree.query(9..).is_err());
        // 2冪に切り上げた分の葉は範囲外
        assert!(segtree.query(0..=7).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = segtree.query(5..4);
        assert!(reversed.is_err());
    }

    #[test]
    fn update_test() {
        let mut segtree = Segtree::from_iter_op([-4i64, 6, -3, 2, 1, 1, 7], Mode::Sum);

        assert_eq!(segtree.query(..), Ok(10));
        assert_eq!(segtree.query(..3), Ok(-1));

        *segtree.get_mut(2).unwrap() = 3;
        assert_eq!(segtree.query(..), Ok(16));
        assert_eq!(segtree.query(3..), Ok(11));
        assert_eq!(segtree.query(..3), Ok(5));

        segtree.update(6, 0).unwrap();
        assert_eq!(segtree.query(..), Ok(9));
        assert_eq!(
            segtree.update(7, 0),
            Err(QueryError::IndexOutOfRange { index: 7, len: 7 })
        );
        assert!(segtree.get_mut(7).is_err());
        assert_eq!(segtree.into_vec(), vec![-4, 6, 3, 2, 1, 1, 0]);
    }

    #[test]
    fn xor_product_test() {
        let segtree = Segtree::from_iter_op([5i64, 3, 6], Mode::Xor);
        assert_eq!(segtree.query(..), Ok(5 ^ 3 ^ 6));
        assert_eq!(segtree.query(1..), Ok(3 ^ 6));

        let mut segtree = Segtree::from_iter_op([2i64, 0, 3, 4], Mode::Product);
        assert_eq!(segtree.query(..), Ok(0));
        assert_eq!(segtree.query(2..), Ok(12));
        segtree.update(1, 5).unwrap();
        assert_eq!(segtree.query(..), Ok(120));
    }

    #[test]
    fn partition_point_test() {
        let segtree = [3u32, 5, 2, 1, 9, 11, 15, 3]
            .into_iter()
            .collect::<Segtree<_, operation::Sum<_>>>();

        assert_eq!(segtree.upper_bound(0, |v| *v <= 20), Ok(5));
        assert_eq!(segtree.upper_bound(1, |v| *v <= 20), Ok(5));
        assert_eq!(segtree.upper_bound(4, |v| *v <= 25), Ok(6));
        assert_eq!(segtree.upper_bound(3, |v| *v <= 100), Ok(8));
        assert_eq!(segtree.upper_bound(8, |v| *v <= 20), Ok(8));

        assert_eq!(segtree.lower_bound(8, |v| *v <= 18), Ok(6));
        assert_eq!(segtree.lower_bound(4, |v| *v <= 3), Ok(2));
        assert_eq!(segtree.lower_bound(4, |v| *v <= 100), Ok(0));
        assert_eq!(segtree.lower_bound(0, |v| *v <= 0), Ok(0));
    }

    #[test]
    fn partition_point_padding_test() {
        let segtree = Segtree::from_iter_op([3i64, 5, 2, 1, 9], Mode::Sum);
        assert_eq!(segtree.upper_bound(0, |v| *v <= 100), Ok(5));
        assert_eq!(segtree.upper_bound(2, |v| *v <= 3), Ok(4));
    }

    #[test]
    fn max_query_test() {
        let mut segtree = Segtree::from_iter_op([23i64, 12, -3, 0, 3, -2, 7, 8], Mode::Max);

        assert_eq!(segtree.query(..), Ok(23));
        assert_eq!(segtree.query(1..), Ok(12));
        assert_eq!(segtree.query(2..6), Ok(3));
        assert_eq!(segtree.query(2..=6), Ok(7));

        segtree.update(2, 5).unwrap();
        assert_eq!(segtree.query(2..6), Ok(5));

        segtree.update(0, 10).unwrap();
        assert_eq!(segtree.upper_bound(2, |v| *v < 12), Ok(8));
        assert_eq!(segtree.upper_bound(2, |v| *v < 7), Ok(6));
    }

    #[test]
    fn partition_point_error_test() {
        let segtree = [3u32, 5, 2, 1, 9, 11, 15, 3]
            .into_iter()
            .collect::<Segtree<_, operation::Sum<_>>>();
        assert_eq!(
            segtree.upper_bound(9, |v| *v <= 20),
            Err(QueryError::IndexOutOfRange { index: 9, len: 8 })
        );
        assert!(segtree.lower_bound(9, |v| *v <= 20).is_err());
    }

    #[test]
    fn empty_test() {
        let segtree = Segtree::from_iter_op(iter::empty::<i64>(), Mode::Sum);
        assert!(segtree.is_empty());
        assert_eq!(segtree.query(..), Ok(0));
        assert!(segtree.query(0..1).is_err());
        assert_eq!(segtree.upper_bound(0, |_| true), Ok(0));
    }
}
