// Sector and cluster I/O
// Whole-sector and whole-cluster positioned transfers. Every write here ends
// with a durability barrier, so callers never batch.

use fatmod_core::FatmodError;

use super::volume::Fat32Volume;

type FatmodResult<T> = Result<T, FatmodError>;

impl Fat32Volume {
    /// Read one whole sector.
    pub fn read_sector(&mut self, sector: u32) -> FatmodResult<Vec<u8>> {
        let mut buf = vec![0u8; self.layout.bytes_per_sector as usize];
        self.image
            .read_exact_at(self.layout.sector_offset(sector), &mut buf)?;
        Ok(buf)
    }

    /// Write one whole sector and force it to storage.
    pub fn write_sector(&mut self, sector: u32, buf: &[u8]) -> FatmodResult<()> {
        if buf.len() != self.layout.bytes_per_sector as usize {
            return Err(FatmodError::Other(format!(
                "Sector write needs {} bytes, got {}",
                self.layout.bytes_per_sector,
                buf.len()
            )));
        }
        self.image
            .write_all_at(self.layout.sector_offset(sector), buf)?;
        self.image.sync()
    }

    /// Read one whole data cluster.
    pub fn read_cluster(&mut self, cluster: u32) -> FatmodResult<Vec<u8>> {
        let offset = self.layout.cluster_offset(cluster)?;
        let mut buf = vec![0u8; self.layout.cluster_size as usize];
        self.image.read_exact_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Write one whole data cluster and force it to storage.
    pub fn write_cluster(&mut self, cluster: u32, buf: &[u8]) -> FatmodResult<()> {
        if buf.len() != self.layout.cluster_size as usize {
            return Err(FatmodError::Other(format!(
                "Cluster write needs {} bytes, got {}",
                self.layout.cluster_size,
                buf.len()
            )));
        }
        let offset = self.layout.cluster_offset(cluster)?;
        self.image.write_all_at(offset, buf)?;
        self.image.sync()
    }
}
