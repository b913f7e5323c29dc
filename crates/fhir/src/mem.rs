use rust_decimal::Decimal;
use std::mem::size_of;

/// Memory accounting for model values.
///
/// [`heap_size`](MemSize::heap_size) counts the bytes a value owns on the
/// heap: string and vector capacity, boxed children and everything they own
/// in turn. [`mem_size`](MemSize::mem_size) adds the inline size.
pub trait MemSize {
    fn heap_size(&self) -> usize;

    fn mem_size(&self) -> usize {
        std::mem::size_of_val(self) + self.heap_size()
    }
}

macro_rules! inline_only {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MemSize for $ty {
                fn heap_size(&self) -> usize {
                    0
                }
            }
        )*
    };
}

inline_only!(bool, u32, i32, Decimal);

impl MemSize for String {
    fn heap_size(&self) -> usize {
        self.capacity()
    }
}

impl<T: MemSize> MemSize for Option<T> {
    fn heap_size(&self) -> usize {
        self.as_ref().map_or(0, MemSize::heap_size)
    }
}

impl<T: MemSize> MemSize for Vec<T> {
    fn heap_size(&self) -> usize {
        self.capacity() * size_of::<T>() + self.iter().map(MemSize::heap_size).sum::<usize>()
    }
}

impl<T: MemSize + ?Sized> MemSize for Box<T> {
    fn heap_size(&self) -> usize {
        std::mem::size_of_val(&**self) + (**self).heap_size()
    }
}
