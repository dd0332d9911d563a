mod etcd_collect;
mod pipeline;
