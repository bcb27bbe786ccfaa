use query::{Group, Monoid, QueryError, Result};

/// 一点更新・累積和取得のBinaryIndexedTree
///
/// 添字は1-indexed。`data[i]`は区間`(i - lowbit(i), i]`の集約値を持つ。
/// 演算は可換であることを仮定する。
#[derive(Debug, Clone)]
pub struct Fenwick<T, OP> {
    data: Box<[T]>,
    op: OP,
}

#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl<T, OP> Fenwick<T, OP> {
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.len() {
            Err(QueryError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone, OP: Monoid<Element = T>> Fenwick<T, OP> {
    pub fn new(len: usize, op: OP) -> Self {
        let data = std::iter::repeat_with(|| op.identity())
            .take(len + 1)
            .collect();
        tracing::debug!(len, "fenwick tree created");
        Self { data, op }
    }

    /// 空の木に`update`をn回行ったものと同じ木をO(n)で構築する。
    pub fn from_iter_op<I: IntoIterator<Item = T>>(iter: I, op: OP) -> Self {
        let mut data = std::iter::once(op.identity())
            .chain(iter)
            .collect::<Vec<_>>();
        let len = data.len() - 1;
        for i in 1..=len {
            let parent = i + lowbit(i);
            if parent <= len {
                let child = data[i].clone();
                op.op_assign(&mut data[parent], &child);
            }
        }
        tracing::debug!(len, "fenwick tree built");
        Self {
            data: data.into_boxed_slice(),
            op,
        }
    }

    /// `index`番目(1-indexed)の要素に`delta`を演算する。
    pub fn update(&mut self, index: usize, delta: T) -> Result<()> {
        self.check_index(index)?;
        let mut i = index;
        while i <= self.len() {
            self.op.op_assign(&mut self.data[i], &delta);
            i += lowbit(i);
        }
        Ok(())
    }

    /// 先頭`index`個の要素の集約値。`index == 0`のときは単位元。
    pub fn prefix_query(&self, index: usize) -> Result<T> {
        if index > self.len() {
            return Err(QueryError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        let mut i = index;
        let mut res = self.op.identity();
        while i > 0 {
            self.op.op_assign(&mut res, &self.data[i]);
            i -= lowbit(i);
        }
        Ok(res)
    }
}

impl<T: Clone, OP: Group<Element = T>> Fenwick<T, OP> {
    /// 閉区間`[left, right]`(1-indexed)の集約値。`left == right + 1`のときは単位元。
    pub fn range_query(&self, left: usize, right: usize) -> Result<T> {
        if left == 0 || right > self.len() || left > right + 1 {
            return Err(QueryError::InvalidRange {
                start: left,
                end: right,
                len: self.len(),
            });
        }
        let total = self.prefix_query(right)?;
        if left == 1 {
            // 区間の差を取らないので、逆元を持たない演算でも答えられる
            return Ok(total);
        }
        let part = self.prefix_query(left - 1)?;
        self.op.op_inv(&total, &part)
    }

    /// `index`番目(1-indexed)の要素。
    ///
    /// `range_query(index, index)`と同じなので、逆元を持たない演算(min, max)では
    /// `index == 1`以外は`UnsupportedOperation`になる。
    pub fn get(&self, index: usize) -> Result<T> {
        self.check_index(index)?;
        self.range_query(index, index)
    }
}

impl<I, OP> FromIterator<I> for Fenwick<I, OP>
where
    I: Clone,
    OP: Default + Monoid<Element = I>,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from_iter_op(iter, OP::default())
    }
}
