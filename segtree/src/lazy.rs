use std::{iter, mem, ops::RangeBounds};

use query::{Act, QueryError, Result};

use super::{get_lr, Segtree};

/// 区間作用・区間取得の遅延セグメント木
///
/// `lazy[i]`は頂点`i`自身には作用済みで、子にはまだ作用させていない作用素。
#[derive(Debug, Clone)]
pub struct LazySegtree<T, A: Act<Element = T>> {
    size: usize,
    half: usize,
    data: Box<[T]>,
    lazy: Box<[A::Action]>,
    act: A,
}

impl<T: Clone, A: Act<Element = T>> LazySegtree<T, A> {
    pub const fn len(&self) -> usize {
        self.size
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn from_iter_op<I>(iter: I, act: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_segtree(Segtree::from_iter_op(iter, act))
    }

    pub fn from_segtree(segtree: Segtree<T, A>) -> Self {
        let Segtree {
            size,
            half,
            data,
            op: act,
        } = segtree;
        let lazy = iter::repeat_with(|| act.identity_action())
            .take(half)
            .collect();
        Self {
            size,
            half,
            data,
            lazy,
            act,
        }
    }

    fn eval(&mut self, i: usize) {
        self.data[i] = self.act.op(&self.data[i * 2], &self.data[i * 2 + 1]);
    }

    /// 長さ`len`の頂点`i`の部分木全体に`f`を作用させる。
    fn apply_all_tree(&mut self, i: usize, f: &A::Action, len: usize) {
        self.act.apply(&mut self.data[i], f, len);
        if i < self.half {
            self.act.compose(&mut self.lazy[i], f);
        }
    }

    /// 頂点`i`(長さ`len`)の作用素を子に伝播させる。
    fn push(&mut self, i: usize, len: usize) {
        if i >= self.half {
            return;
        }
        let f = mem::replace(&mut self.lazy[i], self.act.identity_action());
        self.apply_all_tree(i * 2, &f, len / 2);
        self.apply_all_tree(i * 2 + 1, &f, len / 2);
    }

    fn apply_rec(&mut self, i: usize, lo: usize, hi: usize, l: usize, r: usize, f: &A::Action) {
        if r <= lo || hi <= l {
            return;
        }
        if l <= lo && hi <= r {
            self.apply_all_tree(i, f, hi - lo);
            return;
        }
        self.push(i, hi - lo);
        let mid = (lo + hi) / 2;
        self.apply_rec(i * 2, lo, mid, l, r, f);
        self.apply_rec(i * 2 + 1, mid, hi, l, r, f);
        self.eval(i);
    }

    fn query_rec(&mut self, i: usize, lo: usize, hi: usize, l: usize, r: usize) -> T {
        if r <= lo || hi <= l {
            return self.act.identity();
        }
        if l <= lo && hi <= r {
            return self.data[i].clone();
        }
        self.push(i, hi - lo);
        let mid = (lo + hi) / 2;
        let left = self.query_rec(i * 2, lo, mid, l, r);
        let right = self.query_rec(i * 2 + 1, mid, hi, l, r);
        self.act.op(&left, &right)
    }

    /// `range`の各要素に`f`を作用させる。O(log(n))
    pub fn apply_range<R: RangeBounds<usize>>(&mut self, range: R, f: A::Action) -> Result<()> {
        let (l, r) = get_lr(self.size, range)?;
        if l < r {
            self.apply_rec(1, 0, self.half, l, r, &f);
        }
        Ok(())
    }

    /// 作用素を伝播させながら区間の集約値を求めるため、`&mut self`を取る。
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> Result<T> {
        let (l, r) = get_lr(self.size, range)?;
        if l == r {
            return Ok(self.act.identity());
        }
        Ok(self.query_rec(1, 0, self.half, l, r))
    }

    pub fn get(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        self.query(index..=index)
    }

    /// `index`番目の要素を`value`で置き換える。
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        let i = index + self.half;
        let height = self.half.trailing_zeros();
        for j in (1..=height).rev() {
            self.push(i >> j, 1 << j);
        }
        self.data[i] = value;
        for j in 1..=height {
            self.eval(i >> j);
        }
        Ok(())
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

    fn apply_all(&mut self) {
        let mut len = self.half;
        let mut level = 1;
        while level < self.half {
            for i in level..level * 2 {
                self.push(i, len);
            }
            level *= 2;
            len /= 2;
        }
    }

    /// 作用素をすべて作用させた後の配列を返す。データ数をnとすると、O(n)時間かかることに注意。
    pub fn to_vec(&mut self) -> Vec<T> {
        self.apply_all();
        self.data[self.half..self.half + self.size].to_vec()
    }
}
